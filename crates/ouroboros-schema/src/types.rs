//! Schema node model
//!
//! This module defines the schema tree produced by the transformer: typed
//! nodes (string, number, integer, boolean, array, object) and the boolean
//! combinators (all-of, one-of, not).

use std::fmt;

// ============================================================================
// Node Type
// ============================================================================

/// Kind of typed schema node a constraint group describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    String,
    Object,
    Array,
    Boolean,
    Integer,
    Number,
}

impl NodeType {
    /// JSON Schema `type` keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// String Format
// ============================================================================

/// Predefined string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringFormat {
    /// Email address
    Email,
    /// Absolute URI
    Uri,
    /// URI or relative reference
    #[default]
    UriReference,
    /// UUID
    Uuid,
    /// ISO 8601 DateTime
    DateTime,
    /// Date (YYYY-MM-DD)
    Date,
    /// Time (HH:MM:SS)
    Time,
}

impl StringFormat {
    /// JSON Schema `format` keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Uri => "uri",
            Self::UriReference => "uri-reference",
            Self::Uuid => "uuid",
            Self::DateTime => "date-time",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Typed Nodes
// ============================================================================

/// String node; unset attributes are omitted from the schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    /// Minimum length (in characters)
    pub min_length: Option<usize>,
    /// Maximum length (in characters)
    pub max_length: Option<usize>,
    /// Regex pattern
    pub pattern: Option<String>,
    /// Predefined format
    pub format: Option<StringFormat>,
    /// Exact value
    pub const_value: Option<String>,
}

impl StringSchema {
    /// String node accepting exactly `value`
    pub fn constant(value: impl Into<String>) -> Self {
        Self {
            const_value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Whether no attribute is set
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Number node
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberSchema {
    /// Exact value
    pub const_value: Option<f64>,
}

impl NumberSchema {
    pub fn constant(value: f64) -> Self {
        Self {
            const_value: Some(value),
        }
    }
}

/// Integer node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerSchema {
    /// Exact value
    pub const_value: Option<i64>,
}

impl IntegerSchema {
    pub fn constant(value: i64) -> Self {
        Self {
            const_value: Some(value),
        }
    }
}

/// Boolean node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanSchema {
    /// Exact value
    pub const_value: Option<bool>,
}

impl BooleanSchema {
    pub fn constant(value: bool) -> Self {
        Self {
            const_value: Some(value),
        }
    }
}

/// Array node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArraySchema {
    /// Schema every element must satisfy
    pub items: Option<Box<SchemaNode>>,
    /// Minimum number of items
    pub min_items: Option<usize>,
    /// Maximum number of items
    pub max_items: Option<usize>,
}

impl ArraySchema {
    /// Homogeneous array of `items`
    pub fn of(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }
}

// ============================================================================
// Object Node
// ============================================================================

/// Named property of an object node
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub name: String,
    pub schema: SchemaNode,
}

/// Ordered set of object properties
///
/// Names are unique; insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectProperties {
    entries: Vec<ObjectProperty>,
}

impl ObjectProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property
    ///
    /// Replacing an existing name keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, schema: SchemaNode) {
        let name = name.into();
        match self.entries.iter_mut().find(|property| property.name == name) {
            Some(existing) => existing.schema = schema,
            None => self.entries.push(ObjectProperty { name, schema }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.entries
            .iter()
            .find(|property| property.name == name)
            .map(|property| &property.schema)
    }

    /// Property names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|property| property.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectProperty> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObjectProperties {
    type Item = &'a ObjectProperty;
    type IntoIter = std::slice::Iter<'a, ObjectProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Object node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    /// Properties in declaration order
    pub properties: ObjectProperties,
    /// Required property names (unique, first-marked order)
    pub required: Vec<String>,
    /// `Some(true)` accepts undeclared properties; `None` leaves it unspecified
    pub additional_properties: Option<bool>,
}

impl ObjectSchema {
    /// Mark a property as required (idempotent)
    pub fn require(&mut self, name: &str) {
        if !self.is_required(name) {
            self.required.push(name.to_string());
        }
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }
}

// ============================================================================
// Schema Node
// ============================================================================

/// Node of a schema tree
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    String(StringSchema),
    Number(NumberSchema),
    Integer(IntegerSchema),
    Boolean(BooleanSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    /// Conjunction of child nodes (empty means always valid)
    AllOf(Vec<SchemaNode>),
    /// Exactly one child node must hold
    OneOf(Vec<SchemaNode>),
    /// Negation of the child node
    Not(Box<SchemaNode>),
}

impl SchemaNode {
    pub fn all_of(nodes: Vec<SchemaNode>) -> Self {
        Self::AllOf(nodes)
    }

    pub fn one_of(nodes: Vec<SchemaNode>) -> Self {
        Self::OneOf(nodes)
    }

    pub fn not(node: SchemaNode) -> Self {
        Self::Not(Box::new(node))
    }

    /// Type of a typed node; `None` for combinators
    pub fn node_type(&self) -> Option<NodeType> {
        match self {
            Self::String(_) => Some(NodeType::String),
            Self::Number(_) => Some(NodeType::Number),
            Self::Integer(_) => Some(NodeType::Integer),
            Self::Boolean(_) => Some(NodeType::Boolean),
            Self::Array(_) => Some(NodeType::Array),
            Self::Object(_) => Some(NodeType::Object),
            Self::AllOf(_) | Self::OneOf(_) | Self::Not(_) => None,
        }
    }

    /// Human-readable node name for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::AllOf(_) => "allOf",
            Self::OneOf(_) => "oneOf",
            Self::Not(_) => "not",
            typed => typed.node_type().map_or("unknown", NodeType::as_str),
        }
    }

    pub fn as_string(&self) -> Option<&StringSchema> {
        match self {
            Self::String(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySchema> {
        match self {
            Self::Array(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(schema) => Some(schema),
            _ => None,
        }
    }
}

impl From<StringSchema> for SchemaNode {
    fn from(schema: StringSchema) -> Self {
        Self::String(schema)
    }
}

impl From<ArraySchema> for SchemaNode {
    fn from(schema: ArraySchema) -> Self {
        Self::Array(schema)
    }
}

impl From<ObjectSchema> for SchemaNode {
    fn from(schema: ObjectSchema) -> Self {
        Self::Object(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_display() {
        assert_eq!(NodeType::String.to_string(), "string");
        assert_eq!(NodeType::Integer.to_string(), "integer");
        assert_eq!(NodeType::Number.to_string(), "number");
        assert_eq!(NodeType::Boolean.to_string(), "boolean");
    }

    #[test]
    fn test_string_format_keyword() {
        assert_eq!(StringFormat::Email.as_str(), "email");
        assert_eq!(StringFormat::UriReference.as_str(), "uri-reference");
        assert_eq!(StringFormat::default(), StringFormat::UriReference);
    }

    #[test]
    fn test_string_schema_default_is_unconstrained() {
        assert!(StringSchema::default().is_unconstrained());
        assert!(!StringSchema::constant("0").is_unconstrained());
    }

    #[test]
    fn test_object_properties_replace_in_place() {
        let mut properties = ObjectProperties::new();
        properties.insert("a", SchemaNode::AllOf(vec![]));
        properties.insert("b", SchemaNode::AllOf(vec![]));
        properties.insert("a", SchemaNode::String(StringSchema::default()));

        assert_eq!(properties.names(), vec!["a", "b"]);
        assert_eq!(properties.len(), 2);
        assert_eq!(
            properties.get("a"),
            Some(&SchemaNode::String(StringSchema::default()))
        );
        assert!(properties.get("c").is_none());
    }

    #[test]
    fn test_object_require_deduplicates() {
        let mut object = ObjectSchema::default();
        object.require("name");
        object.require("age");
        object.require("name");
        assert_eq!(object.required, vec!["name".to_string(), "age".to_string()]);
        assert!(object.is_required("age"));
        assert!(!object.is_required("email"));
    }

    #[test]
    fn test_node_type_of_combinators() {
        assert_eq!(SchemaNode::all_of(vec![]).node_type(), None);
        assert_eq!(SchemaNode::not(SchemaNode::all_of(vec![])).kind_name(), "not");
        assert_eq!(
            SchemaNode::Boolean(BooleanSchema::constant(false)).node_type(),
            Some(NodeType::Boolean)
        );
        assert_eq!(SchemaNode::Array(ArraySchema::default()).kind_name(), "array");
    }
}
