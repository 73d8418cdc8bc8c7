//! Raw and canonical value representations
//!
//! Values enter the crate as [`RawValue`], the loosely-typed shape produced by
//! an upstream source (a JSON parser, a database driver). Coercion turns them
//! into [`Value`], the canonical representation mandated by a schema.
//!
//! `Value::from(RawValue)` is the pass-through mapping used whenever a raw
//! value has no better coercion for its target schema.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use bigdecimal::BigDecimal;

/// Loosely-typed value as handed over by an upstream source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Absent value
    Null,
    /// Boolean
    Boolean(bool),
    /// Any integral number
    Integer(i64),
    /// Any floating point number
    Float(f64),
    /// Arbitrary-precision decimal
    Decimal(BigDecimal),
    /// Raw byte sequence
    Bytes(Vec<u8>),
    /// Text, possibly an encoding of another type (e.g. base64 bytes)
    Text(String),
    /// Ordered elements
    Array(Vec<RawValue>),
    /// Key/value pairs in source order
    Map(Vec<(RawValue, RawValue)>),
    /// Named members in source order
    Struct(Vec<(String, RawValue)>),
}

impl RawValue {
    /// Returns the variant name for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Boolean(_) => "boolean",
            RawValue::Integer(_) => "integer",
            RawValue::Float(_) => "float",
            RawValue::Decimal(_) => "decimal",
            RawValue::Bytes(_) => "bytes",
            RawValue::Text(_) => "text",
            RawValue::Array(_) => "array",
            RawValue::Map(_) => "map",
            RawValue::Struct(_) => "struct",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    // Above i64::MAX
                    RawValue::Decimal(BigDecimal::from(u))
                } else {
                    RawValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => RawValue::Text(s),
            serde_json::Value::Array(items) => {
                RawValue::Array(items.into_iter().map(RawValue::from).collect())
            }
            serde_json::Value::Object(members) => RawValue::Struct(
                members
                    .into_iter()
                    .map(|(name, value)| (name, RawValue::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Canonical, schema-conformant value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Logical decimal
    Decimal(BigDecimal),
    /// Logical calendar date
    Date(NaiveDate),
    /// Logical time of day
    Time(NaiveTime),
    /// Logical instant
    Timestamp(DateTime<Utc>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Struct(Vec<(String, Value)>),
}

impl Value {
    /// Returns the variant name for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Decimal(_) => "decimal",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Timestamp(_) => "timestamp",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Struct(_) => "struct",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Looks up a struct member by name.
    pub fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(members) => members
                .iter()
                .find(|(member, _)| member == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

impl From<RawValue> for Value {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Null => Value::Null,
            RawValue::Boolean(b) => Value::Boolean(b),
            RawValue::Integer(i) => Value::Int64(i),
            RawValue::Float(f) => Value::Float64(f),
            RawValue::Decimal(d) => Value::Decimal(d),
            RawValue::Bytes(b) => Value::Bytes(b),
            RawValue::Text(s) => Value::String(s),
            RawValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            RawValue::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::from(k), Value::from(v)))
                    .collect(),
            ),
            RawValue::Struct(members) => Value::Struct(
                members
                    .into_iter()
                    .map(|(name, v)| (name, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
