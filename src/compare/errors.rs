//! Schema mismatch diagnostics
//!
//! Mismatches are reported as structured details (kind, path, expected,
//! actual) rather than a bare boolean, so a failing comparison points at the
//! exact attribute of the exact nested schema.

use std::fmt;

/// Which attribute or structural property differed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    /// Expected side was absent
    ExpectedMissing,
    /// Actual side was absent
    ActualMissing,
    Name,
    Type,
    DefaultValue,
    Optional,
    Doc,
    Version,
    Parameters,
    /// Struct field counts differ
    FieldCount,
    /// A field of the expected struct is absent from the actual struct
    MissingField(String),
}

impl MismatchKind {
    /// Human-readable description of the failed check
    pub fn describe(&self) -> String {
        match self {
            MismatchKind::ExpectedMissing => "expected schema should not be null".into(),
            MismatchKind::ActualMissing => "actual schema should not be null".into(),
            MismatchKind::Name => "schema.name() should match".into(),
            MismatchKind::Type => "schema.type() should match".into(),
            MismatchKind::DefaultValue => "schema.defaultValue() should match".into(),
            MismatchKind::Optional => "schema.isOptional() should match".into(),
            MismatchKind::Doc => "schema.doc() should match".into(),
            MismatchKind::Version => "schema.version() should match".into(),
            MismatchKind::Parameters => "schema.parameters() should match".into(),
            MismatchKind::FieldCount => "fields().size() does not match".into(),
            MismatchKind::MissingField(name) => format!("field({}) not found in actual", name),
        }
    }
}

/// First difference found between two schemas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMismatch {
    /// What differed
    pub kind: MismatchKind,
    /// Path of the schema where it differed (e.g. "order.lines.<element>")
    pub path: String,
    /// Rendering of the expected side
    pub expected: String,
    /// Rendering of the actual side
    pub actual: String,
}

impl SchemaMismatch {
    pub fn new(
        kind: MismatchKind,
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Path for display, `$root` for the top-level schema
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "$root"
        } else {
            &self.path
        }
    }
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: expected {}, got {}",
            self.display_path(),
            self.kind.describe(),
            self.expected,
            self.actual
        )
    }
}

impl std::error::Error for SchemaMismatch {}

/// Result type for schema comparison
pub type CompareResult<T> = Result<T, SchemaMismatch>;
