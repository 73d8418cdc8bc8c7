//! Schema type definitions
//!
//! A schema is a tagged tree: one [`SchemaKind`] variant per primitive type,
//! plus array, map and struct variants that own their nested schemas. Common
//! attributes (logical name, version, doc, parameters, optional flag, default)
//! live on [`Schema`] itself.
//!
//! Supported type tags:
//! - int8, int16, int32, int64: signed integers
//! - float32, float64: IEEE-754 floating point
//! - boolean, string, bytes
//! - array: homogeneous elements
//! - map: homogeneous keys and values
//! - struct: ordered named fields

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::value::Value;

/// Fieldless type tag of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    String,
    Bytes,
    Array,
    Map,
    Struct,
}

impl Type {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Type::Int8 => "int8",
            Type::Int16 => "int16",
            Type::Int32 => "int32",
            Type::Int64 => "int64",
            Type::Float32 => "float32",
            Type::Float64 => "float64",
            Type::Boolean => "boolean",
            Type::String => "string",
            Type::Bytes => "bytes",
            Type::Array => "array",
            Type::Map => "map",
            Type::Struct => "struct",
        }
    }

    /// Returns true for array, map and struct
    pub fn is_composite(&self) -> bool {
        matches!(self, Type::Array | Type::Map | Type::Struct)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Shape of a schema. Composite variants own their nested schemas.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    String,
    Bytes,
    /// Homogeneous array
    Array {
        /// Element schema (boxed to allow recursive types)
        value: Box<Schema>,
    },
    /// Homogeneous map
    Map {
        key: Box<Schema>,
        value: Box<Schema>,
    },
    /// Ordered named fields
    Struct { fields: Vec<Field> },
}

impl SchemaKind {
    /// Returns the type tag of this kind
    pub fn schema_type(&self) -> Type {
        match self {
            SchemaKind::Int8 => Type::Int8,
            SchemaKind::Int16 => Type::Int16,
            SchemaKind::Int32 => Type::Int32,
            SchemaKind::Int64 => Type::Int64,
            SchemaKind::Float32 => Type::Float32,
            SchemaKind::Float64 => Type::Float64,
            SchemaKind::Boolean => Type::Boolean,
            SchemaKind::String => Type::String,
            SchemaKind::Bytes => Type::Bytes,
            SchemaKind::Array { .. } => Type::Array,
            SchemaKind::Map { .. } => Type::Map,
            SchemaKind::Struct { .. } => Type::Struct,
        }
    }

    /// Returns the primitive kind for a non-composite type tag
    pub fn primitive(schema_type: Type) -> Option<SchemaKind> {
        let kind = match schema_type {
            Type::Int8 => SchemaKind::Int8,
            Type::Int16 => SchemaKind::Int16,
            Type::Int32 => SchemaKind::Int32,
            Type::Int64 => SchemaKind::Int64,
            Type::Float32 => SchemaKind::Float32,
            Type::Float64 => SchemaKind::Float64,
            Type::Boolean => SchemaKind::Boolean,
            Type::String => SchemaKind::String,
            Type::Bytes => SchemaKind::Bytes,
            Type::Array | Type::Map | Type::Struct => return None,
        };
        Some(kind)
    }
}

/// A named field of a struct schema
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name, unique within its struct
    pub name: String,
    /// Field schema
    pub schema: Schema,
}

impl Field {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// Complete schema definition
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Type tag and nested schemas
    pub kind: SchemaKind,
    /// Logical name refining the primitive encoding (e.g. "decimal")
    pub name: Option<String>,
    /// Schema version
    pub version: Option<i32>,
    /// Documentation string
    pub doc: Option<String>,
    /// String parameters (e.g. decimal scale)
    pub parameters: BTreeMap<String, String>,
    /// Whether the value may be null
    pub optional: bool,
    /// Value used when none is supplied
    pub default_value: Option<Value>,
}

impl Schema {
    /// Create a required, unnamed schema of the given kind
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            name: None,
            version: None,
            doc: None,
            parameters: BTreeMap::new(),
            optional: false,
            default_value: None,
        }
    }

    /// Returns the type tag
    pub fn schema_type(&self) -> Type {
        self.kind.schema_type()
    }

    /// Returns the logical name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true if the logical name equals `logical_name`
    pub fn is_logical(&self, logical_name: &str) -> bool {
        self.name() == Some(logical_name)
    }

    /// Returns a parameter value
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Element schema of an array, value schema of a map
    pub fn value_schema(&self) -> Option<&Schema> {
        match &self.kind {
            SchemaKind::Array { value } | SchemaKind::Map { value, .. } => Some(&**value),
            _ => None,
        }
    }

    /// Key schema of a map
    pub fn key_schema(&self) -> Option<&Schema> {
        match &self.kind {
            SchemaKind::Map { key, .. } => Some(&**key),
            _ => None,
        }
    }

    /// Fields of a struct, in declaration order
    pub fn fields(&self) -> Option<&[Field]> {
        match &self.kind {
            SchemaKind::Struct { fields } => Some(fields.as_slice()),
            _ => None,
        }
    }

    /// Looks up a struct field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields()?.iter().find(|field| field.name == name)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.schema_type()),
            None => write!(f, "{}", self.schema_type()),
        }
    }
}
