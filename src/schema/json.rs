//! JSON schema envelope and schema-aware JSON values
//!
//! Schemas serialize to the envelope used by CDC tooling:
//!
//! ```text
//! {
//!   "type": "struct", "optional": false, "name": "users", "version": 1,
//!   "doc": "...", "parameters": { ... }, "default": <json>,
//!   "items": { ... },                      // array
//!   "keys": { ... }, "values": { ... },    // map
//!   "fields": [ { "field": "id", "type": "int64", ... } ]
//! }
//! ```
//!
//! Values use their wire encoding: bytes and decimals as base64, dates as a
//! day count, times and timestamps as millisecond counts. Composite values
//! are walked alongside their element schemas; leaves go through [`coerce`].

use base64::Engine as _;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as Json;
use std::collections::BTreeMap;

use super::errors::{SchemaError, SchemaResult};
use super::types::{Field, Schema, SchemaKind, Type};
use crate::coerce::{coerce, CoerceError, CoerceResult, BASE64};
use crate::logical::{date, decimal, time, timestamp};
use crate::value::{RawValue, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SchemaDef {
    #[serde(rename = "type")]
    schema_type: Type,
    #[serde(default)]
    optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doc: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    parameters: BTreeMap<String, String>,
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    default_value: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Box<SchemaDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    keys: Option<Box<SchemaDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<Box<SchemaDef>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FieldDef {
    field: String,
    #[serde(flatten)]
    schema: SchemaDef,
}

impl SchemaDef {
    fn into_schema(self, path: &str) -> SchemaResult<Schema> {
        let nested = |def: Option<Box<SchemaDef>>, attr: &str| -> SchemaResult<Box<Schema>> {
            let def = def.ok_or_else(|| {
                SchemaError::malformed(
                    display_path(path),
                    format!("{} schema requires '{}'", self.schema_type, attr),
                )
            })?;
            Ok(Box::new(def.into_schema(&format!("{}.{}", path, attr))?))
        };

        if !self.fields.is_empty() && self.schema_type != Type::Struct {
            return Err(SchemaError::malformed(
                display_path(path),
                format!("{} schema cannot have fields", self.schema_type),
            ));
        }

        let kind = match self.schema_type {
            Type::Array => SchemaKind::Array {
                value: nested(self.items, "items")?,
            },
            Type::Map => SchemaKind::Map {
                key: nested(self.keys, "keys")?,
                value: nested(self.values, "values")?,
            },
            Type::Struct => {
                let mut fields: Vec<Field> = Vec::with_capacity(self.fields.len());
                for def in self.fields {
                    if fields.iter().any(|f| f.name == def.field) {
                        return Err(SchemaError::malformed(
                            display_path(path),
                            format!("duplicate field '{}'", def.field),
                        ));
                    }
                    let field_path = format!("{}.{}", path, def.field);
                    let schema = def.schema.into_schema(&field_path)?;
                    fields.push(Field::new(def.field, schema));
                }
                SchemaKind::Struct { fields }
            }
            primitive => SchemaKind::primitive(primitive).ok_or_else(|| {
                SchemaError::malformed(display_path(path), format!("unsupported type {}", primitive))
            })?,
        };

        let mut schema = Schema::new(kind);
        schema.name = self.name;
        schema.version = self.version;
        schema.doc = self.doc;
        schema.parameters = self.parameters;
        schema.optional = self.optional;

        if let Some(default) = self.default_value {
            schema.default_value = Some(value_from_json(&schema, default)?);
        }
        Ok(schema)
    }

    fn from_schema(schema: &Schema) -> CoerceResult<Self> {
        let mut def = SchemaDef {
            schema_type: schema.schema_type(),
            optional: schema.optional,
            name: schema.name.clone(),
            version: schema.version,
            doc: schema.doc.clone(),
            parameters: schema.parameters.clone(),
            default_value: None,
            items: None,
            keys: None,
            values: None,
            fields: Vec::new(),
        };

        match &schema.kind {
            SchemaKind::Array { value } => {
                def.items = Some(Box::new(SchemaDef::from_schema(value)?));
            }
            SchemaKind::Map { key, value } => {
                def.keys = Some(Box::new(SchemaDef::from_schema(key)?));
                def.values = Some(Box::new(SchemaDef::from_schema(value)?));
            }
            SchemaKind::Struct { fields } => {
                for field in fields {
                    def.fields.push(FieldDef {
                        field: field.name.clone(),
                        schema: SchemaDef::from_schema(&field.schema)?,
                    });
                }
            }
            _ => {}
        }

        if let Some(default) = &schema.default_value {
            def.default_value = Some(value_to_json(schema, default)?);
        }
        Ok(def)
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "$root".to_string()
    } else {
        format!("$root{}", path)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SchemaDef::from_schema(self)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SchemaDef::deserialize(deserializer)?
            .into_schema("")
            .map_err(D::Error::custom)
    }
}

/// Parses a schema from its JSON envelope.
pub fn schema_from_json(source_name: &str, content: &str) -> SchemaResult<Schema> {
    let def: SchemaDef = serde_json::from_str(content)
        .map_err(|e| SchemaError::malformed(source_name, format!("Invalid JSON: {}", e)))?;
    def.into_schema("").map_err(|e| match e {
        SchemaError::Malformed {
            source_name: path,
            reason,
        } => SchemaError::malformed(source_name, format!("{}: {}", path, reason)),
        other => other,
    })
}

/// Decodes a JSON value in wire form into the canonical value for `schema`.
pub fn value_from_json(schema: &Schema, json: Json) -> CoerceResult<Value> {
    match (&schema.kind, json) {
        (_, Json::Null) => Ok(Value::Null),
        (SchemaKind::Array { value }, Json::Array(items)) => items
            .into_iter()
            .map(|item| value_from_json(value, item))
            .collect::<CoerceResult<Vec<_>>>()
            .map(Value::Array),
        (SchemaKind::Map { key, value }, Json::Object(members)) => members
            .into_iter()
            .map(|(k, v)| Ok((value_from_json(key, Json::String(k))?, value_from_json(value, v)?)))
            .collect::<CoerceResult<Vec<_>>>()
            .map(Value::Map),
        (SchemaKind::Map { key, value }, Json::Array(entries)) if entries.iter().all(is_pair) => {
            entries
                .into_iter()
                .map(|entry| {
                    let mut pair = match entry {
                        Json::Array(pair) => pair.into_iter(),
                        _ => Vec::new().into_iter(),
                    };
                    let k = pair.next().unwrap_or(Json::Null);
                    let v = pair.next().unwrap_or(Json::Null);
                    Ok((value_from_json(key, k)?, value_from_json(value, v)?))
                })
                .collect::<CoerceResult<Vec<_>>>()
                .map(Value::Map)
        }
        (SchemaKind::Struct { fields }, Json::Object(mut members)) => fields
            .iter()
            .map(|field| {
                let member = members.remove(&field.name).unwrap_or(Json::Null);
                Ok((field.name.clone(), value_from_json(&field.schema, member)?))
            })
            .collect::<CoerceResult<Vec<_>>>()
            .map(Value::Struct),
        (SchemaKind::Bytes, Json::String(text)) if schema.is_logical(decimal::LOGICAL_NAME) => {
            let bytes = BASE64
                .decode(text.as_bytes())
                .map_err(|e| CoerceError::InvalidEncoding(e.to_string()))?;
            coerce(schema, RawValue::Bytes(bytes))
        }
        (_, json) => coerce(schema, RawValue::from(json)),
    }
}

/// Encodes a canonical value into its JSON wire form for `schema`.
pub fn value_to_json(schema: &Schema, value: &Value) -> CoerceResult<Json> {
    let json = match value {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::Int8(i) => Json::from(*i),
        Value::Int16(i) => Json::from(*i),
        Value::Int32(i) => Json::from(*i),
        Value::Int64(i) => Json::from(*i),
        Value::Float32(f) => float_json(f64::from(*f)),
        Value::Float64(f) => float_json(*f),
        Value::String(s) => Json::String(s.clone()),
        Value::Bytes(b) => Json::String(BASE64.encode(b)),
        Value::Decimal(d) if schema.is_logical(decimal::LOGICAL_NAME) => {
            Json::String(BASE64.encode(decimal::from_logical(schema, d)?))
        }
        Value::Decimal(d) => Json::String(d.to_string()),
        Value::Date(d) => Json::from(date::from_logical(schema, d)?),
        Value::Time(t) => Json::from(time::from_logical(schema, t)?),
        Value::Timestamp(ts) => Json::from(timestamp::from_logical(schema, ts)?),
        Value::Array(items) => {
            let element = schema.value_schema().unwrap_or(schema);
            Json::Array(
                items
                    .iter()
                    .map(|item| value_to_json(element, item))
                    .collect::<CoerceResult<Vec<_>>>()?,
            )
        }
        Value::Map(entries) => {
            let key_schema = schema.key_schema().unwrap_or(schema);
            let value_schema = schema.value_schema().unwrap_or(schema);
            if entries.iter().all(|(k, _)| matches!(k, Value::String(_))) {
                let mut members = serde_json::Map::new();
                for (k, v) in entries {
                    if let Value::String(name) = k {
                        members.insert(name.clone(), value_to_json(value_schema, v)?);
                    }
                }
                Json::Object(members)
            } else {
                Json::Array(
                    entries
                        .iter()
                        .map(|(k, v)| {
                            Ok(Json::Array(vec![
                                value_to_json(key_schema, k)?,
                                value_to_json(value_schema, v)?,
                            ]))
                        })
                        .collect::<CoerceResult<Vec<_>>>()?,
                )
            }
        }
        Value::Struct(members) => {
            let mut object = serde_json::Map::new();
            for (name, member) in members {
                let member_schema = schema.field(name).map_or(schema, |f| &f.schema);
                object.insert(name.clone(), value_to_json(member_schema, member)?);
            }
            Json::Object(object)
        }
    };
    Ok(json)
}

/// `[key, value]` entry of a map encoded as an array
fn is_pair(entry: &Json) -> bool {
    matches!(entry, Json::Array(pair) if pair.len() == 2)
}

fn float_json(f: f64) -> Json {
    serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaBuilder;
    use chrono::NaiveDate;
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_parse_struct_envelope() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "struct",
            "name": "users",
            "version": 2,
            "fields": [
                { "field": "id", "type": "int64" },
                { "field": "email", "type": "string", "optional": true, "doc": "contact" },
                { "field": "tags", "type": "array", "items": { "type": "string" } }
            ]
        }))
        .unwrap();

        assert_eq!(schema.schema_type(), Type::Struct);
        assert_eq!(schema.version, Some(2));
        let email = schema.field("email").unwrap();
        assert!(email.schema.optional);
        assert_eq!(email.schema.doc.as_deref(), Some("contact"));
        let tags = schema.field("tags").unwrap();
        assert_eq!(tags.schema.value_schema().unwrap().schema_type(), Type::String);
    }

    #[test]
    fn test_missing_items_is_malformed() {
        let err = schema_from_json("tags.json", r#"{ "type": "array" }"#).unwrap_err();
        assert!(err.to_string().contains("items"));
    }

    #[test]
    fn test_fields_on_primitive_is_malformed() {
        let err = schema_from_json(
            "bad.json",
            r#"{ "type": "int8", "fields": [ { "field": "a", "type": "int8" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { .. }));
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        let err = schema_from_json("bad.json", r#"{ "type": "uuid" }"#).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_defaults_are_coerced() {
        let schema = schema_from_json(
            "price.json",
            r#"{ "type": "bytes", "name": "decimal", "parameters": { "scale": "2" }, "default": "MDk=" }"#,
        )
        .unwrap();
        assert_eq!(
            schema.default_value,
            Some(Value::Decimal(BigDecimal::from_str("123.45").unwrap()))
        );

        let unpadded = schema_from_json(
            "price.json",
            r#"{ "type": "bytes", "name": "decimal", "parameters": { "scale": "2" }, "default": "MDk" }"#,
        )
        .unwrap();
        assert_eq!(unpadded.default_value, schema.default_value);

        let schema = schema_from_json("small.json", r#"{ "type": "int16", "default": 70000 }"#).unwrap();
        assert_eq!(schema.default_value, Some(Value::Int16(4464)));
    }

    #[test]
    fn test_bad_default_surfaces_coerce_error() {
        let err = schema_from_json(
            "price.json",
            r#"{ "type": "bytes", "name": "decimal", "default": 1 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::Coerce(CoerceError::Configuration { .. })));
    }

    #[test]
    fn test_envelope_round_trip() {
        let schema = SchemaBuilder::struct_()
            .name("event")
            .field("at", timestamp::schema().build().unwrap())
            .field(
                "day",
                date::schema()
                    .default_value(Value::Date(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()))
                    .build()
                    .unwrap(),
            )
            .field(
                "counts",
                SchemaBuilder::map(
                    SchemaBuilder::string().build().unwrap(),
                    SchemaBuilder::int32().build().unwrap(),
                )
                .optional()
                .build()
                .unwrap(),
            )
            .build()
            .unwrap();

        let text = serde_json::to_string(&schema).unwrap();
        let parsed: Schema = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, schema);
    }

    #[test]
    fn test_struct_value_follows_field_schemas() {
        let schema = SchemaBuilder::struct_()
            .field("id", SchemaBuilder::int8().build().unwrap())
            .field("price", decimal::schema(2).build().unwrap())
            .field("note", SchemaBuilder::string().optional().build().unwrap())
            .build()
            .unwrap();

        let value = value_from_json(&schema, json!({ "id": 300, "price": "MDk=" })).unwrap();
        assert_eq!(
            value,
            Value::Struct(vec![
                ("id".into(), Value::Int8(44)),
                ("price".into(), Value::Decimal(BigDecimal::from_str("123.45").unwrap())),
                ("note".into(), Value::Null),
            ])
        );

        let json = value_to_json(&schema, &value).unwrap();
        assert_eq!(json, json!({ "id": 44, "price": "MDk=", "note": null }));
    }

    #[test]
    fn test_map_with_non_string_keys() {
        let schema = SchemaBuilder::map(
            SchemaBuilder::int32().build().unwrap(),
            SchemaBuilder::boolean().build().unwrap(),
        )
        .build()
        .unwrap();
        let value = value_from_json(&schema, json!([[1, true], [2, false]])).unwrap();
        assert_eq!(
            value,
            Value::Map(vec![
                (Value::Int32(1), Value::Boolean(true)),
                (Value::Int32(2), Value::Boolean(false)),
            ])
        );
        assert_eq!(value_to_json(&schema, &value).unwrap(), json!([[1, true], [2, false]]));
    }
}
