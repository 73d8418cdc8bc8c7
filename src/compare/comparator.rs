//! Recursive schema comparison
//!
//! Comparison semantics:
//! - Both sides must be present
//! - Attributes compared in order: name, type, default, optional, doc,
//!   version, parameters
//! - Arrays recurse into the element schema, maps into key then value
//! - Structs require equal field counts and every expected field by name
//! - Depth-first, pre-order; the first mismatch ends the comparison
//!
//! The comparator does not mutate either schema.

use std::fmt::Debug;

use super::errors::{CompareResult, MismatchKind, SchemaMismatch};
use crate::schema::{Field, Schema, SchemaKind};
use crate::value::Value;

/// Compares two schemas, returning the first difference.
///
/// `context` is the path of the schemas being compared; pass `""` for the
/// root.
pub fn compare_schemas(
    expected: Option<&Schema>,
    actual: Option<&Schema>,
    context: &str,
) -> CompareResult<()> {
    let expected = expected.ok_or_else(|| {
        SchemaMismatch::new(MismatchKind::ExpectedMissing, context, "<schema>", "null")
    })?;
    let actual = actual.ok_or_else(|| {
        SchemaMismatch::new(MismatchKind::ActualMissing, context, "<schema>", "null")
    })?;

    check(MismatchKind::Name, context, &expected.name, &actual.name)?;
    check(
        MismatchKind::Type,
        context,
        &expected.schema_type(),
        &actual.schema_type(),
    )?;
    check_with(
        MismatchKind::DefaultValue,
        context,
        &expected.default_value,
        &actual.default_value,
        |e, a| match (e, a) {
            (Some(e), Some(a)) => same_value(e, a),
            (e, a) => e.is_none() && a.is_none(),
        },
    )?;
    check(MismatchKind::Optional, context, &expected.optional, &actual.optional)?;
    check(MismatchKind::Doc, context, &expected.doc, &actual.doc)?;
    check(MismatchKind::Version, context, &expected.version, &actual.version)?;
    check(
        MismatchKind::Parameters,
        context,
        &expected.parameters,
        &actual.parameters,
    )?;

    match (&expected.kind, &actual.kind) {
        (SchemaKind::Array { value: expected }, SchemaKind::Array { value: actual }) => {
            compare_schemas(
                Some(expected.as_ref()),
                Some(actual.as_ref()),
                &make_path(context, "<element>"),
            )
        }
        (
            SchemaKind::Map {
                key: expected_key,
                value: expected_value,
            },
            SchemaKind::Map {
                key: actual_key,
                value: actual_value,
            },
        ) => {
            compare_schemas(
                Some(expected_key.as_ref()),
                Some(actual_key.as_ref()),
                &make_path(context, "<key>"),
            )?;
            compare_schemas(
                Some(expected_value.as_ref()),
                Some(actual_value.as_ref()),
                &make_path(context, "<value>"),
            )
        }
        (SchemaKind::Struct { fields: expected_fields }, SchemaKind::Struct { .. }) => {
            let actual_count = actual.fields().map_or(0, <[Field]>::len);
            check(
                MismatchKind::FieldCount,
                context,
                &expected_fields.len(),
                &actual_count,
            )?;

            for expected_field in expected_fields {
                let actual_field = actual.field(&expected_field.name).ok_or_else(|| {
                    SchemaMismatch::new(
                        MismatchKind::MissingField(expected_field.name.clone()),
                        context,
                        expected_field.name.as_str(),
                        "<absent>",
                    )
                })?;
                compare_fields(Some(expected_field), Some(actual_field), context)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Compares two struct fields by schema; `context` is the enclosing path.
pub fn compare_fields(
    expected: Option<&Field>,
    actual: Option<&Field>,
    context: &str,
) -> CompareResult<()> {
    let expected = expected.ok_or_else(|| {
        SchemaMismatch::new(MismatchKind::ExpectedMissing, context, "<field>", "null")
    })?;
    let actual = actual.ok_or_else(|| {
        SchemaMismatch::new(MismatchKind::ActualMissing, context, "<field>", "null")
    })?;

    compare_schemas(
        Some(&expected.schema),
        Some(&actual.schema),
        &make_path(context, &expected.name),
    )
}

/// Panics with the first mismatch between `expected` and `actual`.
#[track_caller]
pub fn assert_schema_eq(expected: &Schema, actual: &Schema) {
    if let Err(mismatch) = compare_schemas(Some(expected), Some(actual), "") {
        panic!("schemas differ: {}", mismatch);
    }
}

fn check<T: PartialEq + Debug>(
    kind: MismatchKind,
    context: &str,
    expected: &T,
    actual: &T,
) -> CompareResult<()> {
    check_with(kind, context, expected, actual, |e, a| e == a)
}

fn check_with<T: Debug>(
    kind: MismatchKind,
    context: &str,
    expected: &T,
    actual: &T,
    equal: impl Fn(&T, &T) -> bool,
) -> CompareResult<()> {
    if equal(expected, actual) {
        Ok(())
    } else {
        Err(SchemaMismatch::new(
            kind,
            context,
            format!("{:?}", expected),
            format!("{:?}", actual),
        ))
    }
}

/// Value identity: floats compare by bit pattern (NaN equals NaN, 0.0 and
/// -0.0 differ), decimals compare unscaled value and scale.
fn same_value(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Float32(e), Value::Float32(a)) => e.to_bits() == a.to_bits(),
        (Value::Float64(e), Value::Float64(a)) => e.to_bits() == a.to_bits(),
        (Value::Decimal(e), Value::Decimal(a)) => {
            e.as_bigint_and_exponent() == a.as_bigint_and_exponent()
        }
        (Value::Array(e), Value::Array(a)) => {
            e.len() == a.len() && e.iter().zip(a).all(|(e, a)| same_value(e, a))
        }
        (Value::Map(e), Value::Map(a)) => {
            e.len() == a.len()
                && e.iter()
                    .zip(a)
                    .all(|((ek, ev), (ak, av))| same_value(ek, ak) && same_value(ev, av))
        }
        (Value::Struct(e), Value::Struct(a)) => {
            e.len() == a.len()
                && e.iter()
                    .zip(a)
                    .all(|((en, ev), (an, av))| en == an && same_value(ev, av))
        }
        (e, a) => e == a,
    }
}

/// Creates a path from prefix and segment.
fn make_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}
