//! JSON Schema serialization for schema trees
//!
//! Serializes [`SchemaNode`] trees as JSON Schema 2020-12 keywords. Object
//! properties keep their declaration order.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::errors::SchemaResult;
use crate::types::{NodeType, ObjectProperties, SchemaNode};

/// Largest integer an f64 represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        match self {
            SchemaNode::String(schema) => {
                map.serialize_entry("type", NodeType::String.as_str())?;
                if let Some(min) = schema.min_length {
                    map.serialize_entry("minLength", &min)?;
                }
                if let Some(max) = schema.max_length {
                    map.serialize_entry("maxLength", &max)?;
                }
                if let Some(ref pattern) = schema.pattern {
                    map.serialize_entry("pattern", pattern)?;
                }
                if let Some(format) = schema.format {
                    map.serialize_entry("format", format.as_str())?;
                }
                if let Some(ref value) = schema.const_value {
                    map.serialize_entry("const", value)?;
                }
            }

            SchemaNode::Number(schema) => {
                map.serialize_entry("type", NodeType::Number.as_str())?;
                if let Some(value) = schema.const_value {
                    if is_integral(value) {
                        map.serialize_entry("const", &(value as i64))?;
                    } else {
                        map.serialize_entry("const", &value)?;
                    }
                }
            }

            SchemaNode::Integer(schema) => {
                map.serialize_entry("type", NodeType::Integer.as_str())?;
                if let Some(value) = schema.const_value {
                    map.serialize_entry("const", &value)?;
                }
            }

            SchemaNode::Boolean(schema) => {
                map.serialize_entry("type", NodeType::Boolean.as_str())?;
                if let Some(value) = schema.const_value {
                    map.serialize_entry("const", &value)?;
                }
            }

            SchemaNode::Array(schema) => {
                map.serialize_entry("type", NodeType::Array.as_str())?;
                if let Some(ref items) = schema.items {
                    map.serialize_entry("items", &**items)?;
                }
                if let Some(min) = schema.min_items {
                    map.serialize_entry("minItems", &min)?;
                }
                if let Some(max) = schema.max_items {
                    map.serialize_entry("maxItems", &max)?;
                }
            }

            SchemaNode::Object(schema) => {
                map.serialize_entry("type", NodeType::Object.as_str())?;
                if !schema.properties.is_empty() {
                    map.serialize_entry("properties", &schema.properties)?;
                }
                if !schema.required.is_empty() {
                    map.serialize_entry("required", &schema.required)?;
                }
                if let Some(additional) = schema.additional_properties {
                    map.serialize_entry("additionalProperties", &additional)?;
                }
            }

            SchemaNode::AllOf(nodes) => map.serialize_entry("allOf", nodes)?,
            SchemaNode::OneOf(nodes) => map.serialize_entry("oneOf", nodes)?,
            SchemaNode::Not(node) => map.serialize_entry("not", &**node)?,
        }

        map.end()
    }
}

impl Serialize for ObjectProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for property in self {
            map.serialize_entry(&property.name, &property.schema)?;
        }
        map.end()
    }
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER
}

impl SchemaNode {
    /// Convert to a JSON value
    pub fn to_json_value(&self) -> SchemaResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Convert to a compact JSON string
    pub fn to_json(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Convert to a pretty-printed JSON string
    pub fn to_json_pretty(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ArraySchema, BooleanSchema, NumberSchema, ObjectSchema, StringFormat, StringSchema,
    };
    use serde_json::json;

    #[test]
    fn test_string_schema() {
        let schema = SchemaNode::String(StringSchema {
            min_length: Some(1),
            max_length: Some(100),
            pattern: Some("^[a-z]+$".to_string()),
            format: Some(StringFormat::Email),
            const_value: None,
        });

        assert_eq!(
            schema.to_json_value().unwrap(),
            json!({
                "type": "string",
                "minLength": 1,
                "maxLength": 100,
                "pattern": "^[a-z]+$",
                "format": "email"
            })
        );
    }

    #[test]
    fn test_unset_attributes_are_omitted() {
        let schema = SchemaNode::String(StringSchema::default());
        assert_eq!(schema.to_json().unwrap(), r#"{"type":"string"}"#);

        let schema = SchemaNode::Array(ArraySchema::default());
        assert_eq!(schema.to_json().unwrap(), r#"{"type":"array"}"#);
    }

    #[test]
    fn test_integral_number_const() {
        let zero = SchemaNode::Number(NumberSchema::constant(0.0));
        assert_eq!(zero.to_json().unwrap(), r#"{"type":"number","const":0}"#);

        let half = SchemaNode::Number(NumberSchema::constant(0.5));
        assert_eq!(half.to_json().unwrap(), r#"{"type":"number","const":0.5}"#);
    }

    #[test]
    fn test_object_keeps_property_order() {
        let mut object = ObjectSchema::default();
        object.properties.insert("zeta", SchemaNode::String(StringSchema::default()));
        object.properties.insert("alpha", SchemaNode::AllOf(vec![]));
        object.require("zeta");
        object.additional_properties = Some(true);

        let json = SchemaNode::Object(object).to_json().unwrap();
        assert_eq!(
            json,
            r#"{"type":"object","properties":{"zeta":{"type":"string"},"alpha":{"allOf":[]}},"required":["zeta"],"additionalProperties":true}"#
        );
    }

    #[test]
    fn test_combinators() {
        let schema = SchemaNode::all_of(vec![SchemaNode::not(SchemaNode::one_of(vec![
            SchemaNode::Boolean(BooleanSchema::constant(false)),
        ]))]);

        assert_eq!(
            schema.to_json_value().unwrap(),
            json!({"allOf": [{"not": {"oneOf": [{"type": "boolean", "const": false}]}}]})
        );
    }

    #[test]
    fn test_pretty_output() {
        let pretty = SchemaNode::String(StringSchema::constant("0")).to_json_pretty().unwrap();
        assert!(pretty.contains("\n"));
        assert!(pretty.contains(r#""const": "0""#));
    }
}
