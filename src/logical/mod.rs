//! Logical types
//!
//! A logical type refines a primitive encoding through the schema's logical
//! name:
//!
//! | Logical name | Encoding | Canonical value          |
//! |--------------|----------|--------------------------|
//! | `decimal`    | bytes    | `bigdecimal::BigDecimal` |
//! | `date`       | int32    | `chrono::NaiveDate`      |
//! | `time`       | int32    | `chrono::NaiveTime`      |
//! | `timestamp`  | int64    | `chrono::DateTime<Utc>`  |
//!
//! Each submodule offers `schema()`, `to_logical` and `from_logical`.

pub mod date;
pub mod decimal;
pub mod time;
pub mod timestamp;
