//! site_export library: hosted-site configuration export
//!
//! This library reads the configuration records of a hosted site (the `site`
//! row plus its certificates, cron jobs, databases, FTP/SSH users, runtime
//! settings and so on) from a SQLite database and serializes them to JSON.
//!
//! # Example
//!
//! ```no_run
//! use site_export::{run_export, Config, RunOutcome};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     site: "example.com".to_string(),
//!     ..Default::default()
//! };
//!
//! match run_export(&config).await? {
//!     RunOutcome::Printed { tables } => eprintln!("{tables} keys exported"),
//!     RunOutcome::Saved(statuses) => {
//!         for status in statuses {
//!             println!("{status}");
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod error_handling;
pub mod export;
pub mod initialization;
mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt, OutputMode};
pub use error_handling::{ConfigError, DataAccessError, ExportError};
pub use export::{ExportResult, ExportStatus, SiteExporter};
pub use run::{run_export, run_export_to, RunOutcome};
pub use storage::open_connection;

// Internal run module (drives one CLI invocation)
mod run {
    use std::io::{self, Write};

    use log::{debug, info};

    use crate::config::{collect_exported_env, Config, OutputMode};
    use crate::error_handling::ExportError;
    use crate::export::{write_json_line, ExportStatus, IgnoreBrokenPipe, SiteExporter};

    /// What a completed run produced.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RunOutcome {
        /// The site export was printed; holds the number of top-level keys.
        Printed {
            /// Number of keys in the printed object
            tables: usize,
        },
        /// Backup mode; one status per file attempted, site first.
        Saved(Vec<ExportStatus>),
    }

    impl RunOutcome {
        /// True unless a backup file failed to save.
        pub fn is_success(&self) -> bool {
            match self {
                RunOutcome::Printed { .. } => true,
                RunOutcome::Saved(statuses) => statuses.iter().all(ExportStatus::is_success),
            }
        }
    }

    /// Runs one export as described by `config`, printing to stdout in stdout mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, or, in stdout mode,
    /// if the export cannot be fetched or written. Backup failures are
    /// reported through [`RunOutcome::Saved`] instead.
    pub async fn run_export(config: &Config) -> Result<RunOutcome, ExportError> {
        let mut stdout = IgnoreBrokenPipe::new(io::stdout());
        run_export_to(config, &mut stdout).await
    }

    /// Same as [`run_export`], writing stdout-mode JSON to `out`.
    pub async fn run_export_to<W: Write>(
        config: &Config,
        out: &mut W,
    ) -> Result<RunOutcome, ExportError> {
        let env_vars = if config.export_env {
            collect_exported_env()
        } else {
            Vec::new()
        };

        let mut exporter = SiteExporter::connect(&config.database_url)
            .await?
            .with_env_vars(env_vars)
            .with_output_dir(&config.output_dir);

        let outcome = match config.mode {
            OutputMode::Stdout => {
                info!("Exporting {} to stdout", config.site);
                let data = exporter.fetch_site_data(&config.site).await?;
                write_json_line(out, &data).map_err(|source| ExportError::Io {
                    path: "<stdout>".into(),
                    source,
                })?;
                RunOutcome::Printed { tables: data.len() }
            }
            OutputMode::Backup { include_server } => {
                info!(
                    "Backing up {} to {}",
                    config.site,
                    config.output_dir.display()
                );
                let mut statuses = vec![exporter.save_site_data_as_json(&config.site).await];
                if include_server {
                    statuses.push(exporter.save_server_data_as_json().await);
                }
                RunOutcome::Saved(statuses)
            }
        };

        if let Err(e) = exporter.close().await {
            debug!("Error closing database connection: {e}");
        }

        Ok(outcome)
    }
}
