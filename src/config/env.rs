//! Environment variable capture for per-site exports.

use log::debug;

use crate::config::constants::EXPORTED_ENV_VARS;

/// Captures the allow-listed environment variables that are currently set.
///
/// Unset variables and values that are not valid Unicode are skipped.
pub fn collect_exported_env() -> Vec<(String, String)> {
    collect_exported_env_with(|name| std::env::var(name).ok())
}

/// Same as [`collect_exported_env`], but resolves values through `lookup`.
///
/// Lets callers (and tests) supply values without touching the process environment.
pub fn collect_exported_env_with<F>(lookup: F) -> Vec<(String, String)>
where
    F: Fn(&str) -> Option<String>,
{
    EXPORTED_ENV_VARS
        .iter()
        .filter_map(|name| {
            let value = lookup(name)?;
            debug!("Including environment variable {name} in export");
            Some(((*name).to_string(), value))
        })
        .collect()
}
