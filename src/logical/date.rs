//! Date logical type: `int32` days since 1970-01-01.

use chrono::{Duration, NaiveDate};

use crate::coerce::{CoerceError, CoerceResult};
use crate::schema::{Schema, SchemaBuilder};

pub const LOGICAL_NAME: &str = "date";

/// Builder for a date schema
pub fn schema() -> SchemaBuilder {
    SchemaBuilder::int32().name(LOGICAL_NAME).version(1)
}

/// 1970-01-01
fn epoch() -> NaiveDate {
    NaiveDate::default()
}

/// Converts a day count into a calendar date.
pub fn to_logical(_schema: &Schema, days: i32) -> CoerceResult<NaiveDate> {
    epoch()
        .checked_add_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| CoerceError::out_of_range(LOGICAL_NAME, days))
}

/// Converts a calendar date into a day count.
pub fn from_logical(_schema: &Schema, value: &NaiveDate) -> CoerceResult<i32> {
    let days = value.signed_duration_since(epoch()).num_days();
    i32::try_from(days).map_err(|_| CoerceError::out_of_range(LOGICAL_NAME, value))
}
