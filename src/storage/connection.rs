//! Database connection setup.
//!
//! An export run uses exactly one SQLite connection, opened read-only. A
//! missing database file is reported as an error rather than created.

use std::str::FromStr;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;

use crate::error_handling::DataAccessError;

/// Opens a read-only connection to the database at `database_url`.
///
/// Accepts any SQLite URL understood by sqlx, e.g. `sqlite:db.sq3`,
/// or `sqlite:///var/lib/panel/db.sq3`.
///
/// # Errors
///
/// Returns `DataAccessError::Connection` if the URL cannot be parsed or the
/// database cannot be opened.
pub async fn open_connection(database_url: &str) -> Result<SqliteConnection, DataAccessError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| {
            error!("Invalid database URL {database_url}: {e}");
            DataAccessError::Connection(e)
        })?
        .read_only(true);

    let conn = options.connect().await.map_err(|e| {
        error!("Failed to connect to database: {e}");
        DataAccessError::Connection(e)
    })?;

    info!("Connected to {database_url}");
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_database_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite:{}", dir.path().join("absent.sq3").display());

        let result = open_connection(&url).await;
        assert!(matches!(result, Err(DataAccessError::Connection(_))));
        assert!(!dir.path().join("absent.sq3").exists());
    }

    #[tokio::test]
    async fn test_non_sqlite_url_fails_to_connect() {
        let result = open_connection("mysql://root@localhost/panel").await;
        assert!(matches!(result, Err(DataAccessError::Connection(_))));
    }
}
