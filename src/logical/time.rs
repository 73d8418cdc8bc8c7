//! Time logical type: `int32` milliseconds since midnight.

use chrono::{NaiveTime, Timelike};

use crate::coerce::{CoerceError, CoerceResult};
use crate::schema::{Schema, SchemaBuilder};

pub const LOGICAL_NAME: &str = "time";

pub const MILLIS_PER_DAY: i32 = 24 * 60 * 60 * 1000;

/// Builder for a time schema
pub fn schema() -> SchemaBuilder {
    SchemaBuilder::int32().name(LOGICAL_NAME).version(1)
}

/// Converts milliseconds since midnight into a time of day.
///
/// # Errors
///
/// `OutOfRange` unless `0 <= millis < MILLIS_PER_DAY`.
pub fn to_logical(_schema: &Schema, millis: i32) -> CoerceResult<NaiveTime> {
    if !(0..MILLIS_PER_DAY).contains(&millis) {
        return Err(CoerceError::out_of_range(LOGICAL_NAME, millis));
    }
    let secs = (millis / 1000) as u32;
    let nanos = (millis % 1000) as u32 * 1_000_000;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        .ok_or_else(|| CoerceError::out_of_range(LOGICAL_NAME, millis))
}

/// Converts a time of day into milliseconds since midnight.
///
/// Sub-millisecond precision is dropped.
pub fn from_logical(_schema: &Schema, value: &NaiveTime) -> CoerceResult<i32> {
    let millis = value.num_seconds_from_midnight() as i64 * 1000
        + i64::from(value.nanosecond() / 1_000_000);
    i32::try_from(millis)
        .ok()
        .filter(|m| *m < MILLIS_PER_DAY)
        .ok_or_else(|| CoerceError::out_of_range(LOGICAL_NAME, value))
}
