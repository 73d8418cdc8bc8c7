//! Schema Equality Tests
//!
//! Comparator behavior on realistic row schemas:
//! - Reflexivity
//! - Path-qualified diagnostics for nested differences
//! - Fail-fast on the first mismatch

use cdc_coerce::compare::{compare_fields, compare_schemas, MismatchKind};
use cdc_coerce::logical::{date, decimal, timestamp};
use cdc_coerce::{assert_schema_eq, Schema, SchemaBuilder, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn customer(email_optional: bool) -> Schema {
    let mut email = SchemaBuilder::string().doc("primary contact");
    if email_optional {
        email = email.optional();
    }

    let address = SchemaBuilder::struct_()
        .name("address")
        .field("city", SchemaBuilder::string().build().unwrap())
        .field("zip", SchemaBuilder::string().optional().build().unwrap())
        .build()
        .unwrap();

    SchemaBuilder::struct_()
        .name("customer")
        .version(3)
        .field("id", SchemaBuilder::int64().build().unwrap())
        .field("email", email.build().unwrap())
        .field("balance", decimal::schema(2).build().unwrap())
        .field("birthday", date::schema().optional().build().unwrap())
        .field("address", address)
        .field(
            "logins",
            SchemaBuilder::array(timestamp::schema().build().unwrap()).build().unwrap(),
        )
        .field(
            "flags",
            SchemaBuilder::map(
                SchemaBuilder::string().build().unwrap(),
                SchemaBuilder::boolean().default_value(Value::Boolean(false)).build().unwrap(),
            )
            .build()
            .unwrap(),
        )
        .build()
        .unwrap()
}

// =============================================================================
// Reflexivity Tests
// =============================================================================

#[test]
fn test_schema_equals_itself() {
    let schema = customer(true);
    assert!(compare_schemas(Some(&schema), Some(&schema), "").is_ok());
    assert_schema_eq(&schema, &schema.clone());

    for schema in [
        SchemaBuilder::int8().build().unwrap(),
        decimal::schema(5).optional().build().unwrap(),
        SchemaBuilder::struct_().build().unwrap(),
        SchemaBuilder::float64().default_value(Value::Float64(f64::NAN)).build().unwrap(),
        SchemaBuilder::float32().default_value(Value::Float32(-0.0)).build().unwrap(),
    ] {
        assert!(compare_schemas(Some(&schema), Some(&schema), "").is_ok());
    }
}

// =============================================================================
// Diagnostic Tests
// =============================================================================

/// Structs that differ only in one field's optional flag name that field.
#[test]
fn test_optional_flag_difference_names_field() {
    let err = compare_schemas(Some(&customer(true)), Some(&customer(false)), "").unwrap_err();
    assert_eq!(err.kind, MismatchKind::Optional);
    assert_eq!(err.path, "email");
    assert!(err.to_string().contains("email"));
}

#[test]
fn test_caller_context_prefixes_path() {
    let err = compare_schemas(Some(&customer(true)), Some(&customer(false)), "orders.customer")
        .unwrap_err();
    assert_eq!(err.path, "orders.customer.email");
}

#[test]
fn test_nested_struct_difference() {
    let expected = customer(true);
    let actual = {
        let address = SchemaBuilder::struct_()
            .name("address")
            .field("city", SchemaBuilder::string().build().unwrap())
            .field("zip", SchemaBuilder::int32().optional().build().unwrap())
            .build()
            .unwrap();
        let mut schema = customer(true);
        if let cdc_coerce::SchemaKind::Struct { fields } = &mut schema.kind {
            fields[4].schema = address;
        }
        schema
    };

    let err = compare_schemas(Some(&expected), Some(&actual), "").unwrap_err();
    assert_eq!(err.kind, MismatchKind::Type);
    assert_eq!(err.path, "address.zip");
    assert_eq!(err.expected, "String");
    assert_eq!(err.actual, "Int32");
}

#[test]
fn test_map_value_default_difference() {
    let expected = customer(true);
    let mut actual = customer(true);
    if let cdc_coerce::SchemaKind::Struct { fields } = &mut actual.kind {
        if let cdc_coerce::SchemaKind::Map { value, .. } = &mut fields[6].schema.kind {
            value.default_value = Some(Value::Boolean(true));
        }
    }

    let err = compare_schemas(Some(&expected), Some(&actual), "").unwrap_err();
    assert_eq!(err.kind, MismatchKind::DefaultValue);
    assert_eq!(err.path, "flags.<value>");
}

#[test]
fn test_renamed_field_reported_as_missing() {
    let expected = SchemaBuilder::struct_()
        .field("id", SchemaBuilder::int64().build().unwrap())
        .field("name", SchemaBuilder::string().build().unwrap())
        .build()
        .unwrap();
    let actual = SchemaBuilder::struct_()
        .field("id", SchemaBuilder::int64().build().unwrap())
        .field("full_name", SchemaBuilder::string().build().unwrap())
        .build()
        .unwrap();

    let err = compare_schemas(Some(&expected), Some(&actual), "").unwrap_err();
    assert_eq!(err.kind, MismatchKind::MissingField("name".into()));
}

#[test]
fn test_field_order_does_not_matter() {
    let expected = SchemaBuilder::struct_()
        .field("a", SchemaBuilder::int8().build().unwrap())
        .field("b", SchemaBuilder::int16().build().unwrap())
        .build()
        .unwrap();
    let actual = SchemaBuilder::struct_()
        .field("b", SchemaBuilder::int16().build().unwrap())
        .field("a", SchemaBuilder::int8().build().unwrap())
        .build()
        .unwrap();
    assert!(compare_schemas(Some(&expected), Some(&actual), "").is_ok());
}

#[test]
fn test_compare_single_field() {
    let schema = customer(true);
    let field = schema.field("balance");
    assert!(compare_fields(field, field, "customer").is_ok());

    let err = compare_fields(field, schema.field("nope"), "customer").unwrap_err();
    assert_eq!(err.kind, MismatchKind::ActualMissing);
    assert_eq!(err.path, "customer");
}

#[test]
#[should_panic(expected = "email")]
fn test_assert_schema_eq_reports_path() {
    assert_schema_eq(&customer(true), &customer(false));
}
