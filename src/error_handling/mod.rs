//! Error handling.
//!
//! Errors are split by boundary:
//! - **Configuration**: invalid command-line input
//! - **Initialization**: logger setup
//! - **Data access**: anything the database driver reports
//! - **Export**: serialization and output failures, wrapping data access errors

mod types;

// Re-export public API
pub use types::{ConfigError, DataAccessError, ExportError, InitializationError};
