//! Export queries.
//!
//! Every satellite table is joined back to `site` by a fixed convention,
//! described once here as a [`QuerySpec`]. Table and column names are
//! compile-time constants and are interpolated into the SQL; the domain name is
//! the only runtime input and is always bound as a parameter.

use std::sync::LazyLock;

/// Root query selecting the site itself.
pub const SITE_QUERY: &str = "SELECT * FROM site WHERE domain_name = ?";

/// Table name of the root query.
pub const SITE_TABLE: &str = "site";

/// Server-wide tables, exported unfiltered and in this order.
pub const SERVER_TABLES: [&str; 4] = ["config", "database_server", "firewall_rule", "vhost_template"];

/// Intermediate table used to reach `site` from a satellite table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinSpec {
    /// Name of the intermediate table
    pub join_table: &'static str,
    /// Column on the intermediate table matched by the satellite's key
    pub join_table_key: &'static str,
    /// Column on the intermediate table matched against `site`
    pub join_site_key: &'static str,
}

/// How a satellite table joins back to `site`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySpec {
    /// Satellite table to export
    pub table: &'static str,
    /// Column on the `site` table
    pub primary_key_column: &'static str,
    /// Column on the satellite table
    pub foreign_key_column: &'static str,
    /// Optional intermediate table
    pub join: Option<JoinSpec>,
}

impl QuerySpec {
    /// Satellite joined directly: `t.{fk} = s.{pk}`.
    pub const fn direct(
        table: &'static str,
        foreign_key_column: &'static str,
        primary_key_column: &'static str,
    ) -> Self {
        Self {
            table,
            primary_key_column,
            foreign_key_column,
            join: None,
        }
    }

    /// Satellite joined through `join_table`:
    /// `t.{fk} = jt.{join_table_key}` and `jt.{join_site_key} = s.{pk}`.
    pub const fn via(
        table: &'static str,
        foreign_key_column: &'static str,
        primary_key_column: &'static str,
        join_table: &'static str,
        join_table_key: &'static str,
        join_site_key: &'static str,
    ) -> Self {
        Self {
            table,
            primary_key_column,
            foreign_key_column,
            join: Some(JoinSpec {
                join_table,
                join_table_key,
                join_site_key,
            }),
        }
    }

    /// Builds the SELECT for this table, with one `?` placeholder for the domain name.
    pub fn to_sql(&self) -> String {
        match self.join {
            None => format!(
                "SELECT t.* FROM \"{table}\" t \
                 JOIN site s ON t.\"{fk}\" = s.\"{pk}\" \
                 WHERE s.domain_name = ?",
                table = self.table,
                fk = self.foreign_key_column,
                pk = self.primary_key_column,
            ),
            Some(join) => format!(
                "SELECT t.* FROM \"{table}\" t \
                 JOIN \"{jt}\" jt ON t.\"{fk}\" = jt.\"{jt_key}\" \
                 JOIN site s ON jt.\"{js_key}\" = s.\"{pk}\" \
                 WHERE s.domain_name = ?",
                table = self.table,
                jt = join.join_table,
                fk = self.foreign_key_column,
                jt_key = join.join_table_key,
                js_key = join.join_site_key,
                pk = self.primary_key_column,
            ),
        }
    }
}

/// Satellite tables of a site, in export order.
pub const SITE_TABLE_QUERIES: [QuerySpec; 13] = [
    QuerySpec::direct("basic_auth", "id", "basic_auth_id"),
    QuerySpec::direct("blocked_bot", "site_id", "id"),
    QuerySpec::direct("blocked_ip", "site_id", "id"),
    QuerySpec::direct("certificate", "id", "certificate_id"),
    QuerySpec::direct("cron_job", "site_id", "id"),
    QuerySpec::direct("database", "site_id", "id"),
    QuerySpec::via("database_user", "database_id", "id", "database", "id", "site_id"),
    QuerySpec::direct("ftp_user", "site_id", "id"),
    QuerySpec::direct("nodejs_settings", "id", "nodejs_settings_id"),
    QuerySpec::direct("php_settings", "id", "php_settings_id"),
    QuerySpec::direct("python_settings", "id", "python_settings_id"),
    QuerySpec::via("user", "id", "id", "user_sites", "user_id", "site_id"),
    QuerySpec::direct("ssh_user", "site_id", "id"),
];

/// `(table, sql)` pairs for a site export, root query first. Built once per process.
pub static SITE_QUERIES: LazyLock<Vec<(&'static str, String)>> = LazyLock::new(|| {
    std::iter::once((SITE_TABLE, SITE_QUERY.to_string()))
        .chain(SITE_TABLE_QUERIES.iter().map(|spec| (spec.table, spec.to_sql())))
        .collect()
});

/// Unfiltered SELECT for a server-wide table.
pub fn server_table_sql(table: &str) -> String {
    format!("SELECT * FROM \"{table}\"")
}
