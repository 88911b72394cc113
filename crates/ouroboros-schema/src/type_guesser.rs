//! Node type inference for constraint groups
//!
//! Every constraint is classified on its own, then the group must agree on a
//! single node type. Constraints without type information (e.g. `NotBlank`)
//! classify as `None` and never conflict with anything.

use tracing::trace;

use crate::constraints::{Constraint, ConstraintKind};
use crate::errors::{SchemaError, SchemaResult};
use crate::types::NodeType;

/// Infer the node type a whole constraint group describes
///
/// Returns `Ok(None)` when no constraint carries type information, and
/// [`SchemaError::TypeConflict`] when two constraints disagree.
///
/// # Example
/// ```
/// use ouroboros_schema::constraints::{All, Constraint, Length};
/// use ouroboros_schema::type_guesser::guess_type;
/// use ouroboros_schema::NodeType;
///
/// let group = vec![Constraint::NotBlank, Length::at_most(10).into()];
/// assert_eq!(guess_type(&group).unwrap(), Some(NodeType::String));
///
/// let conflict = vec![Constraint::Email, All::new(vec![]).into()];
/// assert!(guess_type(&conflict).is_err());
/// ```
pub fn guess_type(constraints: &[Constraint]) -> SchemaResult<Option<NodeType>> {
    let mut types: Vec<NodeType> = Vec::new();

    for constraint in constraints {
        if let Some(node_type) = guess_type_of(constraint)? {
            if !types.contains(&node_type) {
                types.push(node_type);
            }
        }
    }

    if types.len() > 1 {
        return Err(SchemaError::TypeConflict { types });
    }

    Ok(types.pop())
}

/// Infer the node type of a single constraint
pub fn guess_type_of(constraint: &Constraint) -> SchemaResult<Option<NodeType>> {
    if let Some(declared) = constraint.as_type() {
        return node_type_for_type_name(&declared.type_name);
    }

    let node_type = constraint.lineage().find_map(node_type_for_kind);
    trace!(constraint = %constraint, ?node_type, "classified constraint");
    Ok(node_type)
}

/// Static classification of constraint kinds
///
/// Kinds missing from this table inherit the classification of their nearest
/// classified ancestor; the root carries none.
pub fn node_type_for_kind(kind: ConstraintKind) -> Option<NodeType> {
    match kind {
        ConstraintKind::Length
        | ConstraintKind::Regex
        | ConstraintKind::Email
        | ConstraintKind::Url
        | ConstraintKind::Ulid => Some(NodeType::String),
        ConstraintKind::Collection => Some(NodeType::Object),
        ConstraintKind::All => Some(NodeType::Array),
        _ => None,
    }
}

/// Map a declared type name to its node type
///
/// `numeric` is ambiguous (integer or number) and stays unresolved.
pub fn node_type_for_type_name(type_name: &str) -> SchemaResult<Option<NodeType>> {
    match type_name {
        "bool" | "boolean" => Ok(Some(NodeType::Boolean)),
        // "5.0" is a JSON Schema integer, but not an int for the validator
        "int" | "integer" | "long" => Ok(Some(NodeType::Integer)),
        "float" | "double" | "real" => Ok(Some(NodeType::Number)),
        "string" => Ok(Some(NodeType::String)),
        "array" => Ok(Some(NodeType::Array)),
        "numeric" => Ok(None),
        other => Err(SchemaError::UnknownTypeName(other.to_string())),
    }
}
