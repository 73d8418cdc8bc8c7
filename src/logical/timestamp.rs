//! Timestamp logical type: `int64` milliseconds since the epoch, UTC.

use chrono::{DateTime, Utc};

use crate::coerce::{CoerceError, CoerceResult};
use crate::schema::{Schema, SchemaBuilder};

pub const LOGICAL_NAME: &str = "timestamp";

/// Builder for a timestamp schema
pub fn schema() -> SchemaBuilder {
    SchemaBuilder::int64().name(LOGICAL_NAME).version(1)
}

/// Converts epoch milliseconds into an instant.
pub fn to_logical(_schema: &Schema, millis: i64) -> CoerceResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| CoerceError::out_of_range(LOGICAL_NAME, millis))
}

/// Converts an instant into epoch milliseconds.
pub fn from_logical(_schema: &Schema, value: &DateTime<Utc>) -> CoerceResult<i64> {
    Ok(value.timestamp_millis())
}
