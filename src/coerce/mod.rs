//! Type coercion subsystem
//!
//! Normalizes loosely-typed source values into the canonical representation
//! mandated by a schema. Pure and synchronous; composite values are left to
//! the caller, only leaf and logical values are normalized.

mod coercer;
mod errors;

pub(crate) use coercer::BASE64;
pub use coercer::coerce;
pub use errors::{CoerceError, CoerceResult};
