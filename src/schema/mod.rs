//! Schema subsystem
//!
//! Schemas are self-describing trees: a type tag per node, an optional
//! logical name refining the primitive encoding, string parameters, and
//! nested schemas for arrays, maps and structs.
//!
//! # Design Principles
//!
//! - Composite-only data is reachable only through the matching kind
//! - Parameters compare order-independently
//! - Schemas are immutable once built; coercion and comparison only read them

mod builder;
mod errors;
mod json;
mod loader;
mod types;

pub use builder::SchemaBuilder;
pub use errors::{SchemaError, SchemaResult};
pub use json::{schema_from_json, value_from_json, value_to_json};
pub use loader::SchemaLoader;
pub use types::{Field, Schema, SchemaKind, Type};
