//! Column values with their schema
//!
//! A [`ColumnValue`] pairs a column name with its schema and a canonical
//! value. Its JSON form is what CDC test fixtures store:
//!
//! ```text
//! { "columnName": "price", "schema": { "type": "bytes", ... }, "value": "MDk=" }
//! ```
//!
//! Deserializing decodes the value through the schema, so fixtures written in
//! wire form come back as canonical values.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::coerce::{coerce, CoerceResult};
use crate::schema::{value_from_json, value_to_json, Schema};
use crate::value::{RawValue, Value};

/// A single column of a captured row
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValue {
    pub column_name: String,
    pub schema: Schema,
    pub value: Value,
}

impl ColumnValue {
    /// Creates a column by coercing `raw` into `schema`.
    pub fn new(column_name: impl Into<String>, schema: Schema, raw: RawValue) -> CoerceResult<Self> {
        let value = coerce(&schema, raw)?;
        Ok(Self {
            column_name: column_name.into(),
            schema,
            value,
        })
    }

    /// Returns the value, falling back to the schema default when null.
    pub fn value_or_default(&self) -> &Value {
        match (&self.value, &self.schema.default_value) {
            (Value::Null, Some(default)) => default,
            (value, _) => value,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnValueDef {
    column_name: String,
    schema: Schema,
    #[serde(default)]
    value: serde_json::Value,
}

impl Serialize for ColumnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = value_to_json(&self.schema, &self.value).map_err(S::Error::custom)?;
        ColumnValueDef {
            column_name: self.column_name.clone(),
            schema: self.schema.clone(),
            value,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColumnValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let def = ColumnValueDef::deserialize(deserializer)?;
        let value = value_from_json(&def.schema, def.value)
            .map_err(|e| D::Error::custom(format!("column '{}': {}", def.column_name, e)))?;
        Ok(Self {
            column_name: def.column_name,
            schema: def.schema,
            value,
        })
    }
}
