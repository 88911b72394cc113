//! Ouroboros Schema
//!
//! Derives JSON Schema trees from validation constraints.
//!
//! Applications already describe their input rules as constraints (length
//! ranges, regex patterns, collections of fields, each-element rules). This
//! crate turns those rules into a machine-readable schema for documentation,
//! client-side validation or contract generation, without restating them.
//!
//! # How it works
//!
//! ```text
//! [Constraint, ...] --type_guesser--> NodeType --transformer--> SchemaNode
//!                                                    |
//!                              (recurses into collection fields and All)
//! ```
//!
//! 1. The type guesser classifies every constraint (walking its
//!    specialization lineage) and requires the group to agree on one type.
//! 2. The transformer folds the group into a string, object, array or
//!    untyped (`allOf`) node, recursing into nested constraint groups.
//!
//! # Features
//!
//! - **Default**: `serde` enabled
//! - **serde**: JSON Schema serialization with `serde_json`
//!
//! # Example
//!
//! ```rust
//! use ouroboros_schema::constraints::{Collection, Constraint, FieldConstraints, Length};
//! use ouroboros_schema::{transform, SchemaNode};
//!
//! let user = Collection::new()
//!     .field("name", FieldConstraints::required(Constraint::from(Length::between(1, 50))))
//!     .field("email", FieldConstraints::optional(Constraint::Email))
//!     .allow_missing_fields(true);
//!
//! let schema = transform(&[user.into()]).unwrap();
//! let SchemaNode::Object(object) = &schema else { panic!("expected an object schema") };
//! assert_eq!(object.properties.names(), vec!["name", "email"]);
//! assert_eq!(object.required, vec!["name".to_string()]);
//! ```

// Public modules
pub mod config;
pub mod constraints;
pub mod errors;
pub mod transformer;
pub mod type_guesser;
pub mod types;

// JSON Schema serialization (feature-gated)
#[cfg(feature = "serde")]
pub mod json_schema;

// Re-export commonly used types
pub use config::TransformerConfig;
pub use constraints::{
    All, Collection, Constraint, ConstraintKind, FieldConstraints, Length, Regex, Specialized,
    TypeConstraint,
};
pub use errors::{SchemaError, SchemaResult};
pub use transformer::{transform, ConstraintTransformer, ULID_LENGTH, ULID_PATTERN};
pub use type_guesser::{guess_type, guess_type_of};
pub use types::{
    ArraySchema, BooleanSchema, IntegerSchema, NodeType, NumberSchema, ObjectProperties,
    ObjectProperty, ObjectSchema, SchemaNode, StringFormat, StringSchema,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
