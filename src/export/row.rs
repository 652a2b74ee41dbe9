//! Row decoding.
//!
//! Table schemas are not enumerated anywhere in this crate, so rows are read
//! generically: every column becomes a [`Scalar`] tagged by the SQLite storage
//! class of its value.

use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// A single column value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// SQL NULL
    Null,
    /// INTEGER stored in a column declared BOOLEAN
    Bool(bool),
    /// INTEGER
    Int(i64),
    /// REAL
    Float(f64),
    /// TEXT or BLOB, decoded lossily as UTF-8
    Text(String),
}

impl Scalar {
    /// Returns true for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

/// One exported row: column name to value, in query column order.
///
/// Never holds a [`Scalar::Null`]; null columns are dropped on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowData {
    columns: Vec<(String, Scalar)>,
}

impl RowData {
    /// Builds a row, dropping null-valued columns.
    pub fn from_columns<I, K>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, Scalar)>,
        K: Into<String>,
    {
        Self {
            columns: columns
                .into_iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Value of `column`, if present and non-null.
    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Number of non-null columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if every column was null.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for RowData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Reads every column of a SQLite row into a [`RowData`].
///
/// On failure, returns the name of the offending column alongside the driver error.
pub fn extract_row_data(row: &SqliteRow) -> Result<RowData, (String, sqlx::Error)> {
    let mut columns = Vec::with_capacity(row.len());

    for column in row.columns() {
        let name = column.name();
        let value = decode_column(row, column.ordinal(), is_boolean_column(column))
            .map_err(|e| (name.to_string(), e))?;
        columns.push((name.to_string(), value));
    }

    Ok(RowData::from_columns(columns))
}

fn is_boolean_column(column: &sqlx::sqlite::SqliteColumn) -> bool {
    column.type_info().name().eq_ignore_ascii_case("BOOLEAN")
}

fn decode_column(row: &SqliteRow, idx: usize, boolean: bool) -> Result<Scalar, sqlx::Error> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Scalar::Null);
    }

    // Dispatch on the storage class of the value itself; SQLite does not
    // enforce declared column types.
    let scalar = match raw.type_info().name() {
        "INTEGER" if boolean => Scalar::Bool(row.try_get_unchecked::<i64, _>(idx)? != 0),
        "INTEGER" => Scalar::Int(row.try_get_unchecked(idx)?),
        "REAL" => float_scalar(row.try_get_unchecked(idx)?),
        _ => {
            let bytes: Vec<u8> = row.try_get_unchecked(idx)?;
            Scalar::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
    };

    Ok(scalar)
}

/// JSON has no representation for infinities or NaN, so those are kept as text.
fn float_scalar(value: f64) -> Scalar {
    if value.is_finite() {
        Scalar::Float(value)
    } else if value.is_nan() {
        Scalar::Text("nan".to_string())
    } else if value.is_sign_positive() {
        Scalar::Text("inf".to_string())
    } else {
        Scalar::Text("-inf".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Connection, SqliteConnection};

    #[test]
    fn test_null_columns_are_dropped() {
        let row = RowData::from_columns([
            ("a", Scalar::Int(1)),
            ("b", Scalar::Null),
            ("c", Scalar::from("x")),
        ]);
        assert_eq!(row.column_names().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"a":1,"c":"x"}"#
        );
    }

    #[test]
    fn test_all_null_row_is_empty_object() {
        let row = RowData::from_columns([("a", Scalar::Null)]);
        assert!(row.is_empty());
        assert_eq!(serde_json::to_string(&row).unwrap(), "{}");
    }

    #[test]
    fn test_column_order_is_preserved() {
        let row = RowData::from_columns([
            ("zeta", Scalar::Int(1)),
            ("alpha", Scalar::Int(2)),
            ("mid", Scalar::Int(3)),
        ]);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":3}"#
        );
    }

    #[tokio::test]
    async fn test_extract_row_data_maps_storage_classes() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        let row = sqlx::query("SELECT 42 AS i, 1.5 AS f, 'text' AS t, NULL AS n, X'6869' AS b")
            .fetch_one(&mut conn)
            .await
            .unwrap();

        let data = extract_row_data(&row).unwrap();
        assert_eq!(data.get("i"), Some(&Scalar::Int(42)));
        assert_eq!(data.get("f"), Some(&Scalar::Float(1.5)));
        assert_eq!(data.get("t"), Some(&Scalar::from("text")));
        assert_eq!(data.get("b"), Some(&Scalar::from("hi")));
        assert_eq!(data.get("n"), None);
        assert_eq!(data.len(), 4);
    }

    #[tokio::test]
    async fn test_extract_row_data_follows_value_not_declared_type() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        sqlx::query("CREATE TABLE loose (port INTEGER, label TEXT)")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query("INSERT INTO loose (port, label) VALUES ('auto', 80)")
            .execute(&mut conn)
            .await
            .unwrap();

        let row = sqlx::query("SELECT * FROM loose")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        let data = extract_row_data(&row).unwrap();
        assert_eq!(data.get("port"), Some(&Scalar::from("auto")));
        assert_eq!(data.get("label"), Some(&Scalar::from("80")));
    }

    #[tokio::test]
    async fn test_infinite_real_is_exported_as_text() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        sqlx::query("CREATE TABLE database_server (id INTEGER PRIMARY KEY, ratio REAL)")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query("INSERT INTO database_server (ratio) VALUES (9e999), (-9e999)")
            .execute(&mut conn)
            .await
            .unwrap();

        let rows = sqlx::query("SELECT * FROM database_server ORDER BY id")
            .fetch_all(&mut conn)
            .await
            .unwrap();
        let data: Vec<RowData> = rows.iter().map(|r| extract_row_data(r).unwrap()).collect();
        assert_eq!(data[0].get("ratio"), Some(&Scalar::from("inf")));
        assert_eq!(data[1].get("ratio"), Some(&Scalar::from("-inf")));
        assert_eq!(
            serde_json::to_string(&data[0]).unwrap(),
            r#"{"id":1,"ratio":"inf"}"#
        );
    }

    #[test]
    fn test_nan_is_not_a_float() {
        assert_eq!(float_scalar(f64::NAN), Scalar::from("nan"));
        assert_eq!(float_scalar(2.5), Scalar::Float(2.5));
    }

    #[tokio::test]
    async fn test_invalid_utf8_text_is_decoded_lossily() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        sqlx::query("CREATE TABLE config (name TEXT, value TEXT)")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query("INSERT INTO config (name, value) VALUES ('motd', CAST(X'C328' AS TEXT))")
            .execute(&mut conn)
            .await
            .unwrap();

        let row = sqlx::query("SELECT * FROM config")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        let data = extract_row_data(&row).expect("corrupt text should not fail the row");
        assert_eq!(data.get("name"), Some(&Scalar::from("motd")));
        assert_eq!(data.get("value"), Some(&Scalar::from("\u{FFFD}(")));
    }

    #[tokio::test]
    async fn test_boolean_column_decodes_as_bool() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        sqlx::query(
            "CREATE TABLE php_settings (id INTEGER PRIMARY KEY, enabled BOOLEAN, flag boolean, workers INTEGER)",
        )
        .execute(&mut conn)
        .await
        .unwrap();
        sqlx::query("INSERT INTO php_settings (enabled, flag, workers) VALUES (1, 0, 1)")
            .execute(&mut conn)
            .await
            .unwrap();

        let row = sqlx::query("SELECT * FROM php_settings")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        let data = extract_row_data(&row).unwrap();
        assert_eq!(data.get("enabled"), Some(&Scalar::Bool(true)));
        assert_eq!(data.get("flag"), Some(&Scalar::Bool(false)));
        assert_eq!(data.get("workers"), Some(&Scalar::Int(1)));
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"id":1,"enabled":true,"flag":false,"workers":1}"#
        );
    }
}
