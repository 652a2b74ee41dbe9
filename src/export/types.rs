//! Export types.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::row::RowData;

/// Value stored under one key of an [`ExportResult`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ExportEntry {
    /// Rows returned for a table
    Rows(Vec<RowData>),
    /// Plain value, used for environment variables
    Value(String),
}

/// Ordered mapping from table name (or environment variable name) to exported data.
///
/// Serializes as a JSON object whose keys keep insertion order. A table only
/// appears if it returned at least one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportResult {
    entries: Vec<(String, ExportEntry)>,
}

impl ExportResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the rows returned for `table`. Empty row sets are skipped.
    ///
    /// Returns whether the table was added.
    pub fn insert_rows(&mut self, table: impl Into<String>, rows: Vec<RowData>) -> bool {
        if rows.is_empty() {
            return false;
        }
        self.insert(table.into(), ExportEntry::Rows(rows));
        true
    }

    /// Records a plain value under `key`.
    pub fn insert_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key.into(), ExportEntry::Value(value.into()));
    }

    fn insert(&mut self, key: String, entry: ExportEntry) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Entry stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ExportEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    /// Rows exported for `table`, if any.
    pub fn rows(&self, table: &str) -> Option<&[RowData]> {
        match self.get(table)? {
            ExportEntry::Rows(rows) => Some(rows),
            ExportEntry::Value(_) => None,
        }
    }

    /// True if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was exported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExportResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// Outcome of saving an export to a file.
///
/// The `Display` form is the status line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// The file was written.
    Saved {
        /// Path of the written file
        path: PathBuf,
    },
    /// Nothing was written; holds the error description.
    Failed {
        /// Human-readable error message
        message: String,
    },
}

impl ExportStatus {
    /// True if the file was written.
    pub fn is_success(&self) -> bool {
        matches!(self, ExportStatus::Saved { .. })
    }

    /// Path of the written file, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportStatus::Saved { path } => Some(path),
            ExportStatus::Failed { .. } => None,
        }
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStatus::Saved { path } => {
                // Files in the working directory are reported by name alone.
                let in_cwd = path
                    .parent()
                    .map_or(true, |dir| dir.as_os_str().is_empty() || dir == Path::new("."));
                match path.file_name() {
                    Some(name) if in_cwd => {
                        write!(f, "Data saved to {} successfully.", name.to_string_lossy())
                    }
                    _ => write!(f, "Data saved to {} successfully.", path.display()),
                }
            }
            ExportStatus::Failed { message } => f.write_str(message),
        }
    }
}
