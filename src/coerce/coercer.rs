//! Schema-driven value coercion
//!
//! Coercion rules by schema type:
//! - bytes: decimal when the logical name says so, else base64 text is decoded
//! - int32: date, time, or narrowing to `i32`
//! - int64: timestamp, or conversion to `i64`
//! - int16, int8: narrowing
//! - float32, float64: numeric conversion, precision loss allowed
//! - struct, and everything else: pass-through
//!
//! Null is never coerced. Raw shapes with no rule for the target schema pass
//! through unchanged.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use bigdecimal::{BigDecimal, ToPrimitive};
use num_bigint::{BigInt, Sign};

use super::errors::{CoerceError, CoerceResult};
use crate::logical::{date, decimal, time, timestamp};
use crate::schema::{Schema, SchemaKind};
use crate::value::{RawValue, Value};

/// Standard alphabet. Encodes with padding, decodes with or without it.
pub(crate) const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Coerces `value` into the canonical representation `schema` mandates.
///
/// # Errors
///
/// - `Configuration` for a decimal schema without a usable scale
/// - `InvalidEncoding` for bytes given as malformed base64
/// - `OutOfRange` / `InexactRescale` for values a logical type cannot hold
pub fn coerce(schema: &Schema, value: RawValue) -> CoerceResult<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    match &schema.kind {
        SchemaKind::Bytes if schema.is_logical(decimal::LOGICAL_NAME) => {
            coerce_decimal(schema, value)
        }
        SchemaKind::Bytes => coerce_bytes(value),
        SchemaKind::Int32 if schema.is_logical(date::LOGICAL_NAME) => match integral(&value) {
            Some(days) => Ok(Value::Date(date::to_logical(schema, days as i32)?)),
            None => Ok(Value::from(value)),
        },
        SchemaKind::Int32 if schema.is_logical(time::LOGICAL_NAME) => match integral(&value) {
            Some(millis) => Ok(Value::Time(time::to_logical(schema, millis as i32)?)),
            None => Ok(Value::from(value)),
        },
        SchemaKind::Int32 => Ok(narrow(value, |i| Value::Int32(i as i32))),
        SchemaKind::Int16 => Ok(narrow(value, |i| Value::Int16(i as i16))),
        SchemaKind::Int8 => Ok(narrow(value, |i| Value::Int8(i as i8))),
        SchemaKind::Int64 if schema.is_logical(timestamp::LOGICAL_NAME) => {
            match integral(&value) {
                Some(millis) => Ok(Value::Timestamp(timestamp::to_logical(schema, millis)?)),
                None => Ok(Value::from(value)),
            }
        }
        SchemaKind::Int64 => Ok(narrow(value, Value::Int64)),
        SchemaKind::Float32 => Ok(match value {
            RawValue::Integer(i) => Value::Float32(i as f32),
            RawValue::Float(f) => Value::Float32(f as f32),
            RawValue::Decimal(d) => Value::Float32(d.to_f32().unwrap_or(f32::NAN)),
            other => Value::from(other),
        }),
        SchemaKind::Float64 => Ok(match value {
            RawValue::Integer(i) => Value::Float64(i as f64),
            RawValue::Float(f) => Value::Float64(f),
            RawValue::Decimal(d) => Value::Float64(d.to_f64().unwrap_or(f64::NAN)),
            other => Value::from(other),
        }),
        SchemaKind::Struct { .. } => {
            tracing::trace!(schema = %schema, "struct value passed through");
            Ok(Value::from(value))
        }
        SchemaKind::Boolean
        | SchemaKind::String
        | SchemaKind::Array { .. }
        | SchemaKind::Map { .. } => Ok(Value::from(value)),
    }
}

/// Integral part of a numeric raw value as `i64`.
///
/// Floats truncate toward zero and saturate at the `i64` bounds, NaN is zero.
/// Decimals truncate toward zero and keep the low 64 bits.
fn integral(value: &RawValue) -> Option<i64> {
    match value {
        RawValue::Integer(i) => Some(*i),
        RawValue::Float(f) => Some(*f as i64),
        RawValue::Decimal(d) => Some(truncated_low_bits(d)),
        _ => None,
    }
}

fn truncated_low_bits(value: &BigDecimal) -> i64 {
    let (whole, _) = value.with_scale(0).into_bigint_and_exponent();
    let fill = if whole.sign() == Sign::Minus { 0xFF } else { 0x00 };
    let mut low = [fill; 8];
    for (slot, byte) in low.iter_mut().zip(whole.to_signed_bytes_le()) {
        *slot = byte;
    }
    i64::from_le_bytes(low)
}

/// Applies `to_value` to the integral part of a numeric, passes others through.
fn narrow(value: RawValue, to_value: impl FnOnce(i64) -> Value) -> Value {
    match integral(&value) {
        Some(i) => to_value(i),
        None => Value::from(value),
    }
}

fn coerce_bytes(value: RawValue) -> CoerceResult<Value> {
    match value {
        RawValue::Text(text) => BASE64
            .decode(text.as_bytes())
            .map(Value::Bytes)
            .map_err(|e| CoerceError::InvalidEncoding(e.to_string())),
        other => Ok(Value::from(other)),
    }
}

fn coerce_decimal(schema: &Schema, value: RawValue) -> CoerceResult<Value> {
    match value {
        RawValue::Bytes(bytes) => Ok(Value::Decimal(decimal::to_logical(schema, &bytes)?)),
        RawValue::Decimal(d) => {
            let scale = decimal::scale(schema)?;
            Ok(Value::Decimal(decimal::rescale(d, scale)?))
        }
        RawValue::Integer(_) | RawValue::Float(_) => {
            let scale = decimal::scale(schema)?;
            let unscaled = integral(&value).unwrap_or_default();
            Ok(Value::Decimal(decimal::from_unscaled(BigInt::from(unscaled), scale)))
        }
        other => Ok(Value::from(other)),
    }
}
