//! Basic Transform Example
//!
//! This example derives JSON Schema documents from constraint groups using
//! ouroboros-schema.
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-schema --example basic_transform
//! ```

use ouroboros_schema::{
    constraints::{All, Collection, Constraint, FieldConstraints, Length, Regex, TypeConstraint},
    transform, SchemaNode, SchemaResult,
};

// ============================================================================
// Field-level Constraints
// ============================================================================

fn field_schemas() -> SchemaResult<()> {
    println!("1. Field Constraints");
    println!("--------------------");

    let username = transform(&[
        Constraint::NotBlank,
        Length::between(3, 16).into(),
        Regex::new("^[a-z0-9_]+$").into(),
    ])?;
    println!("  username: {}", username.to_json()?);

    let id = transform(&[Constraint::Ulid])?;
    println!("  id: {}", id.to_json()?);

    let required = transform(&[Constraint::NotBlank])?;
    println!("  not blank: {}", required.to_json()?);
    println!();
    Ok(())
}

// ============================================================================
// Structures
// ============================================================================

fn structure_schema() -> SchemaResult<()> {
    println!("2. Structure Constraints");
    println!("------------------------");

    let signup = Collection::new()
        .field("email", FieldConstraints::required(Constraint::Email))
        .field(
            "name",
            vec![Constraint::NotBlank, Length::at_most(100).into()],
        )
        .field("homepage", FieldConstraints::optional(Constraint::Url))
        .field(
            "tags",
            FieldConstraints::optional(Constraint::from(All::new(vec![Length::between(1, 20).into()]))),
        )
        .allow_missing_fields(true);

    let schema = transform(&[signup.into()])?;
    println!("{}", schema.to_json_pretty()?);
    println!();
    Ok(())
}

// ============================================================================
// Failures
// ============================================================================

fn failures() {
    println!("3. Failures");
    println!("-----------");

    let conflict = transform(&[Constraint::Email, All::default().into()]);
    report("Email + All", &conflict);

    let unsupported = transform(&[TypeConstraint::new("int").into()]);
    report("Type(int)", &unsupported);
    println!();
}

fn report(label: &str, result: &SchemaResult<SchemaNode>) {
    match result {
        Ok(schema) => println!("  {label}: unexpected {}", schema.kind_name()),
        Err(err) => println!("  {label}: {err}"),
    }
}

fn main() -> SchemaResult<()> {
    println!("=== Ouroboros Schema: Basic Transform ===\n");

    field_schemas()?;
    structure_schema()?;
    failures();

    Ok(())
}
