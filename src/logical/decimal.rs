//! Decimal logical type
//!
//! Encoded as `bytes` holding the unscaled value as a big-endian
//! two's-complement integer of any width. The scale lives in the schema
//! parameter [`SCALE_FIELD`].

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::coerce::{CoerceError, CoerceResult};
use crate::schema::{Schema, SchemaBuilder};

pub const LOGICAL_NAME: &str = "decimal";

/// Schema parameter holding the scale
pub const SCALE_FIELD: &str = "scale";

/// Builder for a decimal schema with the given scale
pub fn schema(scale: u32) -> SchemaBuilder {
    SchemaBuilder::bytes()
        .name(LOGICAL_NAME)
        .version(1)
        .parameter(SCALE_FIELD, scale.to_string())
}

/// Reads the declared scale of a decimal schema.
///
/// # Errors
///
/// `Configuration` if the parameter is absent or not a non-negative integer.
pub fn scale(schema: &Schema) -> CoerceResult<u32> {
    let raw = schema.parameter(SCALE_FIELD).ok_or_else(|| {
        CoerceError::configuration(format!(
            "decimal schema is missing the '{}' parameter",
            SCALE_FIELD
        ))
    })?;

    raw.trim().parse::<u32>().map_err(|e| {
        CoerceError::configuration(format!(
            "decimal schema parameter '{}' is not a valid scale '{}': {}",
            SCALE_FIELD, raw, e
        ))
    })
}

/// Number of fractional digits `value` carries
pub fn scale_of(value: &BigDecimal) -> i64 {
    value.as_bigint_and_exponent().1
}

/// Builds a decimal from an unscaled value and a scale.
pub fn from_unscaled(unscaled: BigInt, scale: u32) -> BigDecimal {
    BigDecimal::new(unscaled, i64::from(scale))
}

/// Converts the wire encoding into a decimal at the schema's scale.
///
/// # Errors
///
/// `Configuration` for a schema without a usable scale, `OutOfRange` for an
/// empty byte string.
pub fn to_logical(schema: &Schema, bytes: &[u8]) -> CoerceResult<BigDecimal> {
    let scale = scale(schema)?;
    if bytes.is_empty() {
        return Err(CoerceError::out_of_range(LOGICAL_NAME, "<zero-length bytes>"));
    }
    Ok(from_unscaled(BigInt::from_signed_bytes_be(bytes), scale))
}

/// Converts a decimal into its wire encoding.
///
/// # Errors
///
/// `InexactRescale` if the decimal carries more fractional digits than the
/// schema's scale allows.
pub fn from_logical(schema: &Schema, value: &BigDecimal) -> CoerceResult<Vec<u8>> {
    let scale = scale(schema)?;
    let value = rescale(value.clone(), scale)?;
    let (unscaled, _) = value.into_bigint_and_exponent();
    Ok(unscaled.to_signed_bytes_be())
}

/// Moves `value` to `scale`, failing instead of rounding.
pub fn rescale(value: BigDecimal, scale: u32) -> CoerceResult<BigDecimal> {
    let target = i64::from(scale);
    let current = scale_of(&value);
    if current == target {
        return Ok(value);
    }

    let rescaled = value.with_scale(target);
    if target < current && rescaled != value {
        return Err(CoerceError::InexactRescale {
            value: value.to_string(),
            scale,
        });
    }
    Ok(rescaled)
}
