//! Configuration types.
//!
//! This module defines the enums shared by the CLI and the library, plus the
//! library-level [`Config`] struct that drives a single export run.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::DEFAULT_DATABASE_URL;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// What a run does with the exported site data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Print the site export as JSON to stdout.
    Stdout,
    /// Write `<domain>.json` (and optionally `server.json`) to the output directory.
    Backup {
        /// Also save server-wide settings to `server.json`.
        include_server: bool,
    },
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use site_export::Config;
///
/// let config = Config {
///     site: "example.com".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Domain name of the site to export
    pub site: String,

    /// Database connection string (SQLite URL)
    pub database_url: String,

    /// Stdout or backup-to-file
    pub mode: OutputMode,

    /// Directory receiving backup files
    pub output_dir: PathBuf,

    /// Echo allow-listed environment variables into the site export
    pub export_env: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: String::new(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            mode: OutputMode::Stdout,
            output_dir: PathBuf::from("."),
            export_env: true,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}
