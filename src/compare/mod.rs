//! Schema comparison subsystem
//!
//! Structural equality of schema trees with path-qualified diagnostics.
//! Intended for verification and test suites, not for the coercion path.

mod comparator;
mod errors;

pub use comparator::{assert_schema_eq, compare_fields, compare_schemas};
pub use errors::{CompareResult, MismatchKind, SchemaMismatch};
