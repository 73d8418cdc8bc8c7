//! cdc-coerce - Schema-driven value coercion for change-data-capture records
//!
//! - `coerce`: normalizes loosely-typed source values into the canonical
//!   representation a schema mandates
//! - `compare`: recursive schema equality with path-qualified diagnostics
//! - `schema`: schema model, builder, JSON envelope and loader
//! - `logical`: decimal, date, time and timestamp logical types

pub mod coerce;
pub mod column;
pub mod compare;
pub mod logical;
pub mod schema;
pub mod value;

pub use coerce::{coerce, CoerceError, CoerceResult};
pub use column::ColumnValue;
pub use compare::{assert_schema_eq, compare_schemas, SchemaMismatch};
pub use schema::{Field, Schema, SchemaBuilder, SchemaKind, Type};
pub use value::{RawValue, Value};
