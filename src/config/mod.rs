//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default database URL, exported env vars, file names)
//! - CLI option parsing
//! - Capture of allow-listed environment variables

mod cli;
mod constants;
mod env;
mod types;

// Re-export all constants
pub use cli::Opt;
pub use constants::*;
pub use env::{collect_exported_env, collect_exported_env_with};
pub use types::{Config, LogFormat, LogLevel, OutputMode};
