//! Schema loader for reading schema definitions from disk
//!
//! - One JSON envelope per `*.json` file in the schema directory
//! - Every loaded schema must carry a name
//! - Registry key is `(name, version)`; re-registering a key is rejected

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::json::schema_from_json;
use super::types::Schema;

/// Schema loader that reads schema files from disk and maintains an in-memory registry.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by (name, version)
    schemas: BTreeMap<(String, Option<i32>), Schema>,
}

impl SchemaLoader {
    /// Creates a new schema loader for the given schema directory.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: BTreeMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads all schema files from the schema directory.
    ///
    /// A missing directory holds no schemas. Unreadable or malformed files
    /// abort the load.
    pub fn load_all(&mut self) -> SchemaResult<usize> {
        if !self.schema_dir.exists() {
            tracing::debug!(dir = %self.schema_dir.display(), "schema directory absent");
            return Ok(0);
        }

        let entries = fs::read_dir(&self.schema_dir)
            .map_err(|e| SchemaError::io(self.schema_dir.display().to_string(), e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| SchemaError::io(self.schema_dir.display().to_string(), e))?;
            let path = entry.path();

            if path.extension().map_or(true, |ext| ext != "json") {
                tracing::trace!(path = %path.display(), "skipping non-JSON file");
                continue;
            }
            paths.push(path);
        }

        // Directory order is platform-dependent
        paths.sort();

        for path in &paths {
            self.load_schema_file(path)?;
        }
        Ok(paths.len())
    }

    /// Loads a single schema file.
    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let source_name = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| SchemaError::io(&source_name, e))?;
        let schema = schema_from_json(&source_name, &content)?;

        if schema.name.is_none() {
            return Err(SchemaError::malformed(source_name, "schema has no name"));
        }

        tracing::debug!(
            path = %source_name,
            name = schema.name().unwrap_or_default(),
            version = ?schema.version,
            "loaded schema"
        );
        self.register(schema)
    }

    /// Registers a schema directly (for testing or programmatic creation).
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        let name = schema
            .name
            .clone()
            .ok_or_else(|| SchemaError::malformed("<in-memory>", "schema has no name"))?;
        let key = (name, schema.version);

        if self.schemas.contains_key(&key) {
            return Err(SchemaError::duplicate(key.0, key.1));
        }

        self.schemas.insert(key, schema);
        Ok(())
    }

    /// Gets a schema by name and version.
    pub fn get(&self, name: &str, version: Option<i32>) -> Option<&Schema> {
        self.schemas.get(&(name.to_string(), version))
    }

    /// Gets the highest registered version of a schema.
    pub fn latest(&self, name: &str) -> Option<&Schema> {
        self.schemas
            .range((name.to_string(), None)..=(name.to_string(), Some(i32::MAX)))
            .next_back()
            .map(|(_, schema)| schema)
    }

    /// Checks if a schema exists.
    pub fn exists(&self, name: &str, version: Option<i32>) -> bool {
        self.get(name, version).is_some()
    }

    /// Returns the distinct registered schema names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|(name, _)| name.as_str()).collect();
        names.dedup();
        names
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
