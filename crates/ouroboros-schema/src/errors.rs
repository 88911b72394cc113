//! Transformation error types
//!
//! A transform either produces a complete schema tree or fails with one of
//! these errors; there are no partial results.

use thiserror::Error;

use crate::types::NodeType;

/// Result type for schema transformation
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while deriving a schema from constraints
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A constraint group describes more than one node type
    #[error("Type conflict: constraints describe {}", join_types(.types))]
    TypeConflict { types: Vec<NodeType> },

    /// The inferred node type has no builder
    #[error("Not supported constraint {constraints} (inferred type: {node_type})")]
    UnsupportedConstraint {
        node_type: NodeType,
        constraints: String,
    },

    /// A type declaration names a type outside the known table
    #[error("Not supported declared type '{0}'")]
    UnknownTypeName(String),

    /// Nested constraints are deeper than the configured limit
    #[error("Constraint nesting exceeds maximum depth of {limit}")]
    DepthExceeded { limit: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SchemaError {
    /// Returns true if the constraint group is self-contradictory
    pub fn is_type_conflict(&self) -> bool {
        matches!(self, SchemaError::TypeConflict { .. })
    }

    /// Returns true if a constraint or declared type has no schema counterpart
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            SchemaError::UnsupportedConstraint { .. } | SchemaError::UnknownTypeName(_)
        )
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Serialization(err.to_string())
    }
}

fn join_types(types: &[NodeType]) -> String {
    types
        .iter()
        .map(|node_type| node_type.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_conflict_message_names_types() {
        let err = SchemaError::TypeConflict {
            types: vec![NodeType::String, NodeType::Array],
        };
        assert_eq!(err.to_string(), "Type conflict: constraints describe string, array");
        assert!(err.is_type_conflict());
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_unsupported_classification() {
        let err = SchemaError::UnsupportedConstraint {
            node_type: NodeType::Integer,
            constraints: "Type".to_string(),
        };
        assert!(err.is_unsupported());
        assert!(err.to_string().contains("Type"));
        assert!(err.to_string().contains("integer"));

        let err = SchemaError::UnknownTypeName("resource".to_string());
        assert!(err.is_unsupported());
        assert!(err.to_string().contains("resource"));
    }

    #[test]
    fn test_depth_exceeded_message() {
        let err = SchemaError::DepthExceeded { limit: 4 };
        assert_eq!(err.to_string(), "Constraint nesting exceeds maximum depth of 4");
        assert!(!err.is_type_conflict());
    }
}
