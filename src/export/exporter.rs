//! Site and server exports.

use std::path::{Path, PathBuf};

use log::{debug, error, info};
use sqlx::{Connection, SqliteConnection};

use crate::config::{SERVER_EXPORT_FILE_NAME, SITE_EXPORT_EXTENSION};
use crate::error_handling::{DataAccessError, ExportError};
use crate::storage::open_connection;

use super::json::to_pretty_json;
use super::queries::{server_table_sql, SERVER_TABLES, SITE_QUERIES};
use super::row::{extract_row_data, RowData};
use super::types::{ExportResult, ExportStatus};

/// Exports site and server settings from a single database connection.
///
/// The connection is injected and owned for the lifetime of the exporter;
/// all queries of an export run go through it sequentially.
///
/// # Example
///
/// ```no_run
/// use site_export::export::SiteExporter;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut exporter = SiteExporter::connect("sqlite:db.sq3").await?;
/// let data = exporter.fetch_site_data("example.com").await?;
/// println!("{} tables exported", data.len());
/// # Ok(())
/// # }
/// ```
pub struct SiteExporter {
    conn: SqliteConnection,
    env_vars: Vec<(String, String)>,
    output_dir: PathBuf,
}

impl SiteExporter {
    /// Wraps an open connection. No environment variables are exported and
    /// backups go to the current directory.
    pub fn new(conn: SqliteConnection) -> Self {
        Self {
            conn,
            env_vars: Vec::new(),
            output_dir: PathBuf::from("."),
        }
    }

    /// Opens a connection to `database_url` and wraps it.
    pub async fn connect(database_url: &str) -> Result<Self, DataAccessError> {
        Ok(Self::new(open_connection(database_url).await?))
    }

    /// Variables appended to every site export, in order.
    pub fn with_env_vars(mut self, env_vars: Vec<(String, String)>) -> Self {
        self.env_vars = env_vars;
        self
    }

    /// Directory receiving backup files.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Exports every server-wide table that has rows.
    ///
    /// # Errors
    ///
    /// Returns `DataAccessError` if any table is missing or a query fails.
    pub async fn fetch_server_data(&mut self) -> Result<ExportResult, DataAccessError> {
        let mut data = ExportResult::new();

        for table in SERVER_TABLES {
            let rows = self.fetch_table(table, &server_table_sql(table), None).await?;
            data.insert_rows(table, rows);
        }

        debug!("Server export contains {} tables", data.len());
        Ok(data)
    }

    /// Exports the `site` row for `domain_name` and every satellite table that
    /// has rows for it, followed by the captured environment variables.
    ///
    /// A domain with no matching site yields no table keys.
    ///
    /// # Errors
    ///
    /// Returns `DataAccessError` if any table is missing or a query fails.
    pub async fn fetch_site_data(&mut self, domain_name: &str) -> Result<ExportResult, DataAccessError> {
        let mut data = ExportResult::new();

        for (table, sql) in SITE_QUERIES.iter() {
            let rows = self.fetch_table(table, sql, Some(domain_name)).await?;
            data.insert_rows(*table, rows);
        }

        if data.is_empty() {
            info!("No site found for domain {domain_name}");
        }

        for (name, value) in &self.env_vars {
            data.insert_value(name.as_str(), value.as_str());
        }

        debug!("Site export for {domain_name} contains {} keys", data.len());
        Ok(data)
    }

    /// Saves the site export to `<output_dir>/<domain_name>.json`.
    ///
    /// Never fails: errors are reported through the returned status.
    pub async fn save_site_data_as_json(&mut self, domain_name: &str) -> ExportStatus {
        let path = match self.site_export_path(domain_name) {
            Ok(path) => path,
            Err(e) => return failed(e),
        };
        let data = self.fetch_site_data(domain_name).await;
        save_as_json(data, &path).await
    }

    /// Saves the server export to `<output_dir>/server.json`.
    ///
    /// Never fails: errors are reported through the returned status.
    pub async fn save_server_data_as_json(&mut self) -> ExportStatus {
        let path = self.output_dir.join(SERVER_EXPORT_FILE_NAME);
        let data = self.fetch_server_data().await;
        save_as_json(data, &path).await
    }

    /// Closes the underlying connection.
    pub async fn close(self) -> Result<(), DataAccessError> {
        self.conn.close().await.map_err(DataAccessError::Connection)
    }

    fn site_export_path(&self, domain_name: &str) -> Result<PathBuf, ExportError> {
        // The domain must be a bare file name so the backup lands in output_dir.
        let is_bare = Path::new(domain_name).file_name().and_then(|n| n.to_str()) == Some(domain_name);
        if !is_bare {
            return Err(ExportError::InvalidFileName(domain_name.to_string()));
        }
        Ok(self
            .output_dir
            .join(format!("{domain_name}.{SITE_EXPORT_EXTENSION}")))
    }

    async fn fetch_table(
        &mut self,
        table: &str,
        sql: &str,
        domain_name: Option<&str>,
    ) -> Result<Vec<RowData>, DataAccessError> {
        let mut query = sqlx::query(sql);
        if let Some(domain_name) = domain_name {
            query = query.bind(domain_name);
        }

        let rows = query
            .fetch_all(&mut self.conn)
            .await
            .map_err(|source| DataAccessError::Query {
                table: table.to_string(),
                source,
            })?;

        debug!("{table}: {} rows", rows.len());

        rows.iter()
            .map(|row| {
                extract_row_data(row).map_err(|(column, source)| DataAccessError::Decode {
                    table: table.to_string(),
                    column,
                    source,
                })
            })
            .collect()
    }
}

async fn save_as_json(data: Result<ExportResult, DataAccessError>, path: &Path) -> ExportStatus {
    match write_export(data, path).await {
        Ok(()) => {
            info!("Data saved to {}", path.display());
            ExportStatus::Saved {
                path: path.to_path_buf(),
            }
        }
        Err(e) => failed(e),
    }
}

async fn write_export(
    data: Result<ExportResult, DataAccessError>,
    path: &Path,
) -> Result<(), ExportError> {
    let json = to_pretty_json(&data?)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn failed(e: ExportError) -> ExportStatus {
    error!("{e}");
    ExportStatus::Failed {
        message: e.to_string(),
    }
}
