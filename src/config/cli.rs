//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

use crate::config::constants::{DATABASE_URL_ENV, DEFAULT_DATABASE_URL};
use crate::config::types::{Config, LogFormat, LogLevel, OutputMode};
use crate::error_handling::ConfigError;

/// CLI options for the `site_export` binary.
///
/// `--site` is declared optional so that a missing value is reported with our
/// own message and exit code instead of clap's usage error.
#[derive(Debug, Parser)]
#[command(
    name = "site_export",
    about = "Exports a hosted site's configuration records as JSON."
)]
pub struct Opt {
    /// Domain name of the site to export (e.g. --site=example.com)
    #[arg(long)]
    pub site: Option<String>,

    /// Write <domain>.json instead of printing to stdout
    #[arg(long)]
    pub backup: bool,

    /// Also write server-wide settings to server.json
    #[arg(long, requires = "backup")]
    pub server: bool,

    /// Database connection string
    #[arg(long, env = DATABASE_URL_ENV, default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Directory for backup files
    #[arg(long, value_parser, default_value = ".")]
    pub output_dir: PathBuf,

    /// Do not echo APP_* environment variables into the site export
    #[arg(long)]
    pub no_env: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Converts parsed options into a library [`Config`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSite` when `--site` is absent or blank.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let site = self
            .site
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSite)?;

        let mode = if self.backup {
            OutputMode::Backup {
                include_server: self.server,
            }
        } else {
            OutputMode::Stdout
        };

        Ok(Config {
            site,
            database_url: self.database_url,
            mode,
            output_dir: self.output_dir,
            export_env: !self.no_env,
            log_level: self.log_level,
            log_format: self.log_format,
        })
    }
}
