// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};

/// Hosting panel schema: the `site` table, its satellites and the server-wide tables.
pub const SCHEMA: &[&str] = &[
    "CREATE TABLE site (
        id INTEGER PRIMARY KEY,
        domain_name TEXT NOT NULL,
        root_dir TEXT,
        basic_auth_id INTEGER,
        certificate_id INTEGER,
        nodejs_settings_id INTEGER,
        php_settings_id INTEGER,
        python_settings_id INTEGER
    )",
    "CREATE TABLE basic_auth (id INTEGER PRIMARY KEY, username TEXT, password TEXT)",
    "CREATE TABLE blocked_bot (id INTEGER PRIMARY KEY, site_id INTEGER, name TEXT)",
    "CREATE TABLE blocked_ip (id INTEGER PRIMARY KEY, site_id INTEGER, ip TEXT)",
    "CREATE TABLE certificate (id INTEGER PRIMARY KEY, type TEXT, expires_at TEXT)",
    "CREATE TABLE cron_job (
        id INTEGER PRIMARY KEY,
        site_id INTEGER,
        schedule TEXT,
        command TEXT,
        last_run TEXT
    )",
    "CREATE TABLE \"database\" (id INTEGER PRIMARY KEY, site_id INTEGER, name TEXT)",
    "CREATE TABLE database_user (id INTEGER PRIMARY KEY, database_id INTEGER, username TEXT)",
    "CREATE TABLE ftp_user (id INTEGER PRIMARY KEY, site_id INTEGER, username TEXT, home_dir TEXT)",
    "CREATE TABLE nodejs_settings (id INTEGER PRIMARY KEY, version TEXT)",
    "CREATE TABLE php_settings (id INTEGER PRIMARY KEY, version TEXT, memory_limit TEXT)",
    "CREATE TABLE python_settings (id INTEGER PRIMARY KEY, version TEXT)",
    "CREATE TABLE \"user\" (id INTEGER PRIMARY KEY, email TEXT)",
    "CREATE TABLE user_sites (user_id INTEGER, site_id INTEGER)",
    "CREATE TABLE ssh_user (id INTEGER PRIMARY KEY, site_id INTEGER, username TEXT)",
    "CREATE TABLE config (id INTEGER PRIMARY KEY, name TEXT, value TEXT)",
    "CREATE TABLE database_server (id INTEGER PRIMARY KEY, host TEXT, port INTEGER)",
    "CREATE TABLE firewall_rule (id INTEGER PRIMARY KEY, port INTEGER, protocol TEXT)",
    "CREATE TABLE vhost_template (id INTEGER PRIMARY KEY, name TEXT, content TEXT)",
];

/// Creates every table of the schema on `conn`.
pub async fn create_schema(conn: &mut SqliteConnection) {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .expect("Failed to create schema");
    }
}

/// Opens an in-memory database with the schema applied.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_connection() -> SqliteConnection {
    let mut conn = SqliteConnection::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    create_schema(&mut conn).await;
    conn
}

/// Creates a database file with the schema applied and returns its `sqlite:` URL.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_database_file(path: &Path) -> (SqliteConnection, String) {
    let url = format!("sqlite:{}", path.display());
    let mut conn = SqliteConnectOptions::from_str(&url)
        .expect("Invalid database URL")
        .create_if_missing(true)
        .connect()
        .await
        .expect("Failed to create database file");
    create_schema(&mut conn).await;
    (conn, url)
}

/// Inserts a site with no linked settings and returns its ID.
pub async fn create_test_site(conn: &mut SqliteConnection, domain: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO site (domain_name, root_dir) VALUES (?, ?) RETURNING id")
        .bind(domain)
        .bind(format!("/var/www/{domain}"))
        .fetch_one(&mut *conn)
        .await
        .expect("Failed to insert site")
}

/// Inserts a cron job for `site_id`; `last_run` is left NULL.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_cron_job(conn: &mut SqliteConnection, site_id: i64, command: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO cron_job (site_id, schedule, command) VALUES (?, '*/5 * * * *', ?) RETURNING id",
    )
    .bind(site_id)
    .bind(command)
    .fetch_one(&mut *conn)
    .await
    .expect("Failed to insert cron job")
}
