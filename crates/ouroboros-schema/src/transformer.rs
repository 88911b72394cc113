//! Constraint to schema transformation
//!
//! [`ConstraintTransformer::transform`] asks the type guesser which node type a
//! constraint group describes, then folds the group into a node of that type.
//! Collection fields and each-element constraints are transformed recursively.

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::config::TransformerConfig;
use crate::constraints::{Constraint, ConstraintKind};
use crate::errors::{SchemaError, SchemaResult};
use crate::type_guesser::guess_type;
use crate::types::{
    ArraySchema, BooleanSchema, NodeType, NumberSchema, ObjectSchema, SchemaNode, StringFormat,
    StringSchema,
};

/// Length of a ULID in Crockford base32
pub const ULID_LENGTH: usize = 26;

/// Pattern matching a ULID in Crockford base32
pub const ULID_PATTERN: &str = "[0-7][0-9A-HJKMNP-TV-Z]{25}";

/// Term rejecting blank values: empty array, empty string, "0", 0 and false
static BLANK_REJECTION: Lazy<SchemaNode> = Lazy::new(|| {
    SchemaNode::not(SchemaNode::one_of(vec![
        SchemaNode::Array(ArraySchema {
            min_items: Some(1),
            ..Default::default()
        }),
        SchemaNode::String(StringSchema {
            min_length: Some(1),
            ..Default::default()
        }),
        SchemaNode::not(SchemaNode::String(StringSchema::constant("0"))),
        SchemaNode::not(SchemaNode::Number(NumberSchema::constant(0.0))),
        SchemaNode::not(SchemaNode::Boolean(BooleanSchema::constant(false))),
    ]))
});

// ============================================================================
// Transformer
// ============================================================================

/// Derives schema trees from constraint groups
///
/// Holds no state besides its configuration, so one instance can serve any
/// number of concurrent callers.
///
/// # Example
/// ```
/// use ouroboros_schema::constraints::{Constraint, Length, Regex};
/// use ouroboros_schema::{ConstraintTransformer, SchemaNode};
///
/// let transformer = ConstraintTransformer::new();
/// let schema = transformer
///     .transform(&[Length::between(3, 10).into(), Regex::new("^[a-z]+$").into()])
///     .unwrap();
///
/// let SchemaNode::String(string) = schema else { panic!("expected a string schema") };
/// assert_eq!(string.min_length, Some(3));
/// assert_eq!(string.pattern.as_deref(), Some("^[a-z]+$"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintTransformer {
    config: TransformerConfig,
}

impl ConstraintTransformer {
    /// Create a transformer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transformer with a custom configuration
    pub fn with_config(config: TransformerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    /// Build the schema node described by a constraint group
    ///
    /// # Errors
    ///
    /// - [`SchemaError::TypeConflict`] if the group (or any nested group)
    ///   describes more than one node type
    /// - [`SchemaError::UnsupportedConstraint`] if a group describes a boolean,
    ///   integer or number, which have no builder
    /// - [`SchemaError::UnknownTypeName`] for type declarations outside the
    ///   known table
    /// - [`SchemaError::DepthExceeded`] if a [`TransformerConfig::max_depth()`]
    ///   limit is set and nesting is deeper than it
    pub fn transform(&self, constraints: &[Constraint]) -> SchemaResult<SchemaNode> {
        self.transform_at(constraints, 0)
    }

    fn transform_at(&self, constraints: &[Constraint], depth: usize) -> SchemaResult<SchemaNode> {
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                return Err(SchemaError::DepthExceeded { limit });
            }
        }

        let node_type = guess_type(constraints)?;
        debug!(
            ?node_type,
            constraints = constraints.len(),
            depth,
            "transforming constraint group"
        );

        match node_type {
            Some(NodeType::String) => Ok(SchemaNode::String(self.build_string(constraints))),
            Some(NodeType::Object) => self
                .build_object(constraints, depth)
                .map(SchemaNode::Object),
            Some(NodeType::Array) => self.build_array(constraints, depth).map(SchemaNode::Array),
            None => Ok(self.build_generic(constraints)),
            Some(unsupported) => Err(SchemaError::UnsupportedConstraint {
                node_type: unsupported,
                constraints: describe(constraints),
            }),
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Fold string constraints, last write wins per attribute
    fn build_string(&self, constraints: &[Constraint]) -> StringSchema {
        let mut schema = StringSchema::default();

        for constraint in constraints {
            for kind in constraint.lineage() {
                match kind {
                    ConstraintKind::Length => {
                        if let Some(length) = constraint.as_length() {
                            schema.min_length = length.min;
                            schema.max_length = length.max;
                        }
                    }
                    ConstraintKind::Regex => {
                        if let Some(regex) = constraint.as_regex() {
                            schema.pattern = Some(regex.pattern.clone());
                        }
                    }
                    ConstraintKind::Email => schema.format = Some(StringFormat::Email),
                    ConstraintKind::Url => schema.format = Some(self.config.url_format),
                    ConstraintKind::Ulid => {
                        schema.min_length = Some(ULID_LENGTH);
                        schema.max_length = Some(ULID_LENGTH);
                        schema.pattern = Some(ULID_PATTERN.to_string());
                    }
                    _ => continue,
                }
                trace!(constraint = %constraint, %kind, "applied string constraint");
            }
        }

        schema
    }

    fn build_object(&self, constraints: &[Constraint], depth: usize) -> SchemaResult<ObjectSchema> {
        let mut schema = ObjectSchema::default();

        let collections = constraints
            .iter()
            .filter(|constraint| constraint.conforms_to(ConstraintKind::Collection))
            .filter_map(Constraint::as_collection);

        for collection in collections {
            if collection.allow_extra_fields {
                schema.additional_properties = Some(true);
            }

            for (name, field) in &collection.fields {
                if field.is_required() || !collection.allow_missing_fields {
                    schema.require(name);
                }

                let property = self.transform_at(field.constraints(), depth + 1)?;
                schema.properties.insert(name.clone(), property);
            }
        }

        Ok(schema)
    }

    /// Only the last each-element constraint determines the items schema
    fn build_array(&self, constraints: &[Constraint], depth: usize) -> SchemaResult<ArraySchema> {
        let each = constraints
            .iter()
            .filter(|constraint| constraint.conforms_to(ConstraintKind::All))
            .filter_map(Constraint::as_all)
            .last();

        let items = match each {
            Some(all) => Some(Box::new(self.transform_at(&all.constraints, depth + 1)?)),
            None => None,
        };

        Ok(ArraySchema {
            items,
            ..Default::default()
        })
    }

    /// Combine the value-level assertions of an untyped group
    ///
    /// Only not-blank constraints contribute; everything else is ignored.
    fn build_generic(&self, constraints: &[Constraint]) -> SchemaNode {
        let terms = constraints
            .iter()
            .filter(|constraint| {
                let not_blank = constraint.conforms_to(ConstraintKind::NotBlank);
                if !not_blank {
                    trace!(constraint = %constraint, "ignoring untyped constraint");
                }
                not_blank
            })
            .map(|_| BLANK_REJECTION.clone())
            .collect();

        SchemaNode::AllOf(terms)
    }
}

/// Constraint names of a group, for diagnostics
fn describe(constraints: &[Constraint]) -> String {
    constraints
        .iter()
        .map(Constraint::name)
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the schema node described by a constraint group with the default configuration
pub fn transform(constraints: &[Constraint]) -> SchemaResult<SchemaNode> {
    ConstraintTransformer::new().transform(constraints)
}
