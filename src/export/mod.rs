//! Export functionality.
//!
//! This module runs the fixed battery of site and server queries against the
//! database and turns the rows into an ordered, JSON-serializable
//! [`ExportResult`].

mod exporter;
mod json;
mod queries;
mod row;
mod types;

pub use exporter::SiteExporter;
pub(crate) use json::{write_json_line, IgnoreBrokenPipe};
pub use json::to_pretty_json;
pub use queries::{
    server_table_sql, JoinSpec, QuerySpec, SERVER_TABLES, SITE_QUERIES, SITE_QUERY, SITE_TABLE,
    SITE_TABLE_QUERIES,
};
pub use row::{extract_row_data, RowData, Scalar};
pub use types::{ExportEntry, ExportResult, ExportStatus};
