//! Fluent schema construction
//!
//! ```ignore
//! let schema = SchemaBuilder::struct_()
//!     .name("users")
//!     .field("id", SchemaBuilder::int64().build()?)
//!     .field("email", SchemaBuilder::string().optional().build()?)
//!     .build()?;
//! ```

use std::collections::HashSet;

use super::errors::{SchemaError, SchemaResult};
use super::types::{Field, Schema, SchemaKind};
use crate::value::Value;

/// Builder for [`Schema`].
///
/// Field names are checked when the schema is built, so `field` can be chained
/// freely.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    schema: Schema,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Start a builder for the given kind
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            schema: Schema::new(kind),
            fields: Vec::new(),
        }
    }

    pub fn int8() -> Self {
        Self::new(SchemaKind::Int8)
    }

    pub fn int16() -> Self {
        Self::new(SchemaKind::Int16)
    }

    pub fn int32() -> Self {
        Self::new(SchemaKind::Int32)
    }

    pub fn int64() -> Self {
        Self::new(SchemaKind::Int64)
    }

    pub fn float32() -> Self {
        Self::new(SchemaKind::Float32)
    }

    pub fn float64() -> Self {
        Self::new(SchemaKind::Float64)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn bytes() -> Self {
        Self::new(SchemaKind::Bytes)
    }

    /// Array of `value` elements
    pub fn array(value: Schema) -> Self {
        Self::new(SchemaKind::Array {
            value: Box::new(value),
        })
    }

    /// Map from `key` to `value`
    pub fn map(key: Schema, value: Schema) -> Self {
        Self::new(SchemaKind::Map {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    /// Struct; add fields with [`SchemaBuilder::field`]
    pub fn struct_() -> Self {
        Self::new(SchemaKind::Struct { fields: Vec::new() })
    }

    /// Set the logical name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.schema.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: i32) -> Self {
        self.schema.version = Some(version);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.schema.doc = Some(doc.into());
        self
    }

    /// Set a single parameter, replacing any previous value
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.schema.parameters.insert(key.into(), value.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.schema.optional = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.schema.optional = false;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.schema.default_value = Some(value);
        self
    }

    /// Append a struct field
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push(Field::new(name, schema));
        self
    }

    /// Finish the schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Malformed` if fields were added to a non-struct
    /// schema or a field name repeats.
    pub fn build(self) -> SchemaResult<Schema> {
        let Self { mut schema, fields } = self;
        let source_name = schema.name.clone().unwrap_or_else(|| "<builder>".to_string());

        match &mut schema.kind {
            SchemaKind::Struct { fields: target } => {
                let mut seen = HashSet::new();
                for field in &fields {
                    if !seen.insert(field.name.as_str()) {
                        return Err(SchemaError::malformed(
                            source_name,
                            format!("duplicate field '{}'", field.name),
                        ));
                    }
                }
                *target = fields;
            }
            kind => {
                if !fields.is_empty() {
                    return Err(SchemaError::malformed(
                        source_name,
                        format!("{} schema cannot have fields", kind.schema_type()),
                    ));
                }
            }
        }

        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Type;

    #[test]
    fn test_builds_struct_in_field_order() {
        let schema = SchemaBuilder::struct_()
            .name("users")
            .version(2)
            .doc("user rows")
            .field("id", SchemaBuilder::int64().build().unwrap())
            .field("email", SchemaBuilder::string().optional().build().unwrap())
            .build()
            .unwrap();

        assert_eq!(schema.name(), Some("users"));
        assert_eq!(schema.version, Some(2));
        assert_eq!(schema.doc.as_deref(), Some("user rows"));
        let names: Vec<_> = schema.fields().unwrap().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "email"]);
        assert!(schema.field("email").unwrap().schema.optional);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = SchemaBuilder::struct_()
            .field("id", SchemaBuilder::int64().build().unwrap())
            .field("id", SchemaBuilder::string().build().unwrap())
            .build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("duplicate field 'id'"));
    }

    #[test]
    fn test_fields_on_primitive_rejected() {
        let result = SchemaBuilder::int32()
            .field("x", SchemaBuilder::int32().build().unwrap())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_parameters_and_default() {
        let schema = SchemaBuilder::bytes()
            .parameter("scale", "1")
            .parameter("scale", "2")
            .optional()
            .required()
            .default_value(Value::Bytes(vec![1]))
            .build()
            .unwrap();
        assert_eq!(schema.parameter("scale"), Some("2"));
        assert!(!schema.optional);
        assert_eq!(schema.default_value, Some(Value::Bytes(vec![1])));
        assert_eq!(schema.schema_type(), Type::Bytes);
    }
}
