//! Configuration constants.
//!
//! Defaults and fixed names used by the exporter and the CLI.

/// Database URL used when neither `--database-url` nor `DATABASE_URL` is set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:db.sq3";

/// Environment variable holding the database connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variables echoed into a per-site export when they are set.
///
/// Order matters: variables appear in the export in this order, after all tables.
pub const EXPORTED_ENV_VARS: &[&str] = &["APP_ENV", "APP_DEBUG", "APP_SECRET", "APP_VERSION"];

/// File name used when saving server-wide settings.
pub const SERVER_EXPORT_FILE_NAME: &str = "server.json";

/// Extension appended to the domain name when saving a site backup.
pub const SITE_EXPORT_EXTENSION: &str = "json";

/// Indentation used for pretty-printed JSON output.
pub const JSON_INDENT: &[u8] = b"    ";

/// Message printed when `--site` is missing.
pub const MISSING_SITE_MESSAGE: &str =
    "No site specified. Use --site=example.com to specify the site domain.";
