//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

use crate::config::MISSING_SITE_MESSAGE;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Invalid user input on the command line.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `--site` was not given, or was blank.
    #[error("{}", MISSING_SITE_MESSAGE)]
    MissingSite,
}

/// Any failure at the storage boundary.
///
/// Covers connection failures, malformed queries, missing tables and values
/// that cannot be decoded.
#[derive(Error, Debug)]
pub enum DataAccessError {
    /// The database could not be opened.
    #[error("could not connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    /// A query failed to prepare or execute.
    #[error("query on table `{table}` failed: {source}")]
    Query {
        /// Table the query was exporting
        table: String,
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// A column value could not be read from a returned row.
    #[error("could not decode column `{column}` of table `{table}`: {source}")]
    Decode {
        /// Table the row came from
        table: String,
        /// Column that failed to decode
        column: String,
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },
}

/// Errors produced while writing an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Storage failure while fetching the data.
    #[error("Database error: {0}")]
    DataAccess(#[from] DataAccessError),

    /// Export could not be serialized.
    #[error("Failed to serialize export: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        /// Destination that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The domain name cannot be used as a backup file name.
    #[error("Invalid site domain for a file name: {0}")]
    InvalidFileName(String),
}
