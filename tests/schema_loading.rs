//! Schema Loading Tests
//!
//! Schemas loaded from JSON files must be indistinguishable from schemas
//! built in code, defaults included.

use cdc_coerce::logical::decimal;
use cdc_coerce::schema::{SchemaError, SchemaLoader};
use cdc_coerce::{assert_schema_eq, ColumnValue, SchemaBuilder, Value};
use bigdecimal::BigDecimal;
use serde_json::json;
use std::fs;
use std::str::FromStr;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_schema(dir: &TempDir, file: &str, schema: serde_json::Value) {
    fs::write(dir.path().join(file), serde_json::to_string_pretty(&schema).unwrap()).unwrap();
}

// =============================================================================
// Loader Tests
// =============================================================================

#[test]
fn test_loaded_schema_matches_built_schema() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        &tmp,
        "invoice.json",
        json!({
            "type": "struct",
            "name": "invoice",
            "version": 1,
            "fields": [
                { "field": "id", "type": "int64" },
                { "field": "total", "type": "bytes", "name": "decimal", "version": 1,
                  "parameters": { "scale": "2" }, "default": "AA==" },
                { "field": "lines", "type": "array", "optional": true,
                  "items": { "type": "string" } }
            ]
        }),
    );

    let mut loader = SchemaLoader::new(tmp.path());
    assert_eq!(loader.load_all().unwrap(), 1);

    let expected = SchemaBuilder::struct_()
        .name("invoice")
        .version(1)
        .field("id", SchemaBuilder::int64().build().unwrap())
        .field(
            "total",
            decimal::schema(2)
                .default_value(Value::Decimal(BigDecimal::from_str("0.00").unwrap()))
                .build()
                .unwrap(),
        )
        .field(
            "lines",
            SchemaBuilder::array(SchemaBuilder::string().build().unwrap())
                .optional()
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    assert_schema_eq(&expected, loader.get("invoice", Some(1)).unwrap());
}

#[test]
fn test_malformed_file_names_source() {
    let tmp = TempDir::new().unwrap();
    write_schema(&tmp, "broken.json", json!({ "type": "map", "name": "broken", "keys": { "type": "string" } }));

    let mut loader = SchemaLoader::new(tmp.path());
    let err = loader.load_all().unwrap_err();
    match err {
        SchemaError::Malformed { source_name, reason } => {
            assert!(source_name.contains("broken.json"));
            assert!(reason.contains("values"));
        }
        other => panic!("expected malformed error, got {}", other),
    }
}

#[test]
fn test_duplicate_files_rejected() {
    let tmp = TempDir::new().unwrap();
    let schema = json!({ "type": "int64", "name": "counter", "version": 2 });
    write_schema(&tmp, "a.json", schema.clone());
    write_schema(&tmp, "b.json", schema);

    let mut loader = SchemaLoader::new(tmp.path());
    assert!(matches!(loader.load_all(), Err(SchemaError::Duplicate { .. })));
}

// =============================================================================
// Column Fixture Tests
// =============================================================================

#[test]
fn test_column_fixture_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("column.json");
    fs::write(
        &path,
        r#"{
            "columnName": "shipped_on",
            "schema": { "type": "int32", "name": "date", "version": 1, "optional": true },
            "value": 17240
        }"#,
    )
    .unwrap();

    let column: ColumnValue = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(column.column_name, "shipped_on");
    assert_eq!(
        column.value,
        Value::Date(chrono::NaiveDate::from_ymd_opt(2017, 3, 15).unwrap())
    );
}
