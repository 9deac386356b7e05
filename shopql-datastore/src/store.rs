//! SQLite store for the three e-commerce tables.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::{Null, ToSqlOutput, ValueRef};
use rusqlite::{Connection, ToSql};
use serde_json::{Map, Number, Value as JsonValue};
use tracing::{debug, info};

use crate::error::{DatastoreError, Result};

/// The only tables the HTTP layer may touch.
pub const VALID_TABLES: [&str; 3] = ["sales_summary", "ad_data", "eligibility_status"];

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS sales_summary (
        date TEXT,
        item_id TEXT,
        total_sales REAL,
        total_units_ordered REAL
    );

    CREATE TABLE IF NOT EXISTS ad_data (
        date TEXT,
        item_id TEXT,
        ad_sales REAL,
        impressions REAL,
        ad_spend REAL,
        clicks REAL,
        units_sold REAL
    );

    CREATE TABLE IF NOT EXISTS eligibility_status (
        eligibility_datetime_utc TEXT,
        item_id TEXT,
        eligibility INTEGER,
        message TEXT
    );
";

/// One typed cell value bound into an INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// A floating-point number.
    Number(f64),
    /// An integer, used for 0/1 eligibility flags.
    Integer(i64),
    /// An uninterpreted string.
    Text(String),
    /// An empty cell.
    Null,
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CellValue::Number(v) => ToSqlOutput::from(*v),
            CellValue::Integer(v) => ToSqlOutput::from(*v),
            CellValue::Text(s) => ToSqlOutput::from(s.as_str()),
            CellValue::Null => ToSqlOutput::from(Null),
        })
    }
}

/// Shared handle to the e-commerce SQLite database.
///
/// The connection lives behind a `Mutex` so one store can serve concurrent
/// handlers. Query results are rendered as JSON objects keyed by column
/// name, ready for the HTTP layer.
pub struct SalesStore {
    conn: Mutex<Connection>,
}

impl SalesStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Whether `name` is on the table allow-list.
    pub fn is_valid_table(name: &str) -> bool {
        VALID_TABLES.contains(&name)
    }

    /// Fetch every row of an allow-listed table.
    pub fn fetch_table(&self, table: &str) -> Result<Vec<Map<String, JsonValue>>> {
        if !Self::is_valid_table(table) {
            return Err(DatastoreError::UnknownTable(table.to_string()));
        }
        // Allow-listed name, safe to splice.
        self.run_select(&format!("SELECT * FROM {table}"))
    }

    /// Execute an arbitrary read-only statement and return rows as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DatastoreError::NotReadOnly`] unless the statement starts
    /// with `SELECT` or `WITH`.
    pub fn execute_select(&self, sql: &str) -> Result<Vec<Map<String, JsonValue>>> {
        ensure_read_only(sql)?;
        debug!(sql = %sql, "executing query");
        self.run_select(sql)
    }

    fn run_select(&self, sql: &str) -> Result<Vec<Map<String, JsonValue>>> {
        let conn = self.conn.lock().map_err(|e| DatastoreError::Lock(e.to_string()))?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut object = Map::with_capacity(columns.len());
            for (i, name) in columns.iter().enumerate() {
                object.insert(name.clone(), value_ref_to_json(row.get_ref(i)?));
            }
            out.push(object);
        }
        Ok(out)
    }

    /// Replace the full contents of an allow-listed table.
    ///
    /// Runs as one transaction: existing rows are deleted, then every row in
    /// `rows` is inserted with `columns` as the column list. Returns the
    /// number of rows inserted.
    pub fn replace_rows(
        &self,
        table: &str,
        columns: &[String],
        rows: &[Vec<CellValue>],
    ) -> Result<usize> {
        if !Self::is_valid_table(table) {
            return Err(DatastoreError::UnknownTable(table.to_string()));
        }

        let mut conn = self.conn.lock().map_err(|e| DatastoreError::Lock(e.to_string()))?;
        let tx = conn.transaction()?;
        tx.execute(&format!("DELETE FROM {table}"), [])?;
        {
            let placeholders =
                (1..=columns.len()).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ");
            let sql =
                format!("INSERT INTO {table} ({}) VALUES ({placeholders})", columns.join(", "));
            let mut stmt = tx.prepare(&sql)?;
            for row in rows {
                stmt.execute(rusqlite::params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;

        info!(table = %table, rows = rows.len(), "replaced table contents");
        Ok(rows.len())
    }

    /// Number of rows currently in an allow-listed table.
    pub fn row_count(&self, table: &str) -> Result<usize> {
        if !Self::is_valid_table(table) {
            return Err(DatastoreError::UnknownTable(table.to_string()));
        }
        let conn = self.conn.lock().map_err(|e| DatastoreError::Lock(e.to_string()))?;
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Reject anything that is not a SELECT-style statement.
fn ensure_read_only(sql: &str) -> Result<()> {
    let first = sql.trim_start().split_whitespace().next().unwrap_or("");
    if first.eq_ignore_ascii_case("SELECT") || first.eq_ignore_ascii_case("WITH") {
        Ok(())
    } else {
        Err(DatastoreError::NotReadOnly(first.to_string()))
    }
}

fn value_ref_to_json(value: ValueRef<'_>) -> JsonValue {
    match value {
        ValueRef::Null => JsonValue::Null,
        ValueRef::Integer(i) => JsonValue::from(i),
        // NaN and infinity have no JSON representation.
        ValueRef::Real(f) => Number::from_f64(f).map(JsonValue::Number).unwrap_or(JsonValue::Null),
        ValueRef::Text(t) => JsonValue::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(_) => JsonValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> SalesStore {
        let store = SalesStore::open_in_memory().unwrap();
        store
            .replace_rows(
                "sales_summary",
                &[
                    "date".to_string(),
                    "item_id".to_string(),
                    "total_sales".to_string(),
                    "total_units_ordered".to_string(),
                ],
                &[
                    vec![
                        CellValue::Text("2024-06-01".to_string()),
                        CellValue::Text("17".to_string()),
                        CellValue::Number(120.5),
                        CellValue::Number(4.0),
                    ],
                    vec![
                        CellValue::Text("2024-06-02".to_string()),
                        CellValue::Text("17".to_string()),
                        CellValue::Number(80.0),
                        CellValue::Null,
                    ],
                ],
            )
            .unwrap();
        store
    }

    #[test]
    fn fetch_table_returns_json_rows() {
        let store = seeded_store();
        let rows = store.fetch_table("sales_summary").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["date"], JsonValue::String("2024-06-01".to_string()));
        assert_eq!(rows[0]["total_sales"], JsonValue::from(120.5));
        assert_eq!(rows[1]["total_units_ordered"], JsonValue::Null);
    }

    #[test]
    fn fetch_table_rejects_unknown_table() {
        let store = seeded_store();
        let err = store.fetch_table("users").unwrap_err();
        assert!(matches!(err, DatastoreError::UnknownTable(_)));
        assert_eq!(err.to_string(), "Invalid table name.");
    }

    #[test]
    fn execute_select_runs_aggregates() {
        let store = seeded_store();
        let rows = store.execute_select("SELECT SUM(total_sales) AS s FROM sales_summary").unwrap();
        assert_eq!(rows[0]["s"], JsonValue::from(200.5));
    }

    #[test]
    fn execute_select_allows_with_clause() {
        let store = seeded_store();
        let rows = store
            .execute_select("WITH t AS (SELECT total_sales FROM sales_summary) SELECT COUNT(*) AS n FROM t")
            .unwrap();
        assert_eq!(rows[0]["n"], JsonValue::from(2));
    }

    #[test]
    fn execute_select_rejects_writes() {
        let store = seeded_store();
        for sql in ["DELETE FROM sales_summary", "DROP TABLE ad_data", "insert into ad_data values (1)"] {
            let err = store.execute_select(sql).unwrap_err();
            assert!(matches!(err, DatastoreError::NotReadOnly(_)), "{sql} was not rejected");
        }
    }

    #[test]
    fn replace_rows_overwrites_previous_contents() {
        let store = seeded_store();
        store
            .replace_rows(
                "sales_summary",
                &["date".to_string(), "item_id".to_string(), "total_sales".to_string()],
                &[vec![
                    CellValue::Text("2024-07-01".to_string()),
                    CellValue::Text("9".to_string()),
                    CellValue::Number(1.0),
                ]],
            )
            .unwrap();

        assert_eq!(store.row_count("sales_summary").unwrap(), 1);
    }

    #[test]
    fn eligibility_flag_round_trips_as_integer() {
        let store = SalesStore::open_in_memory().unwrap();
        store
            .replace_rows(
                "eligibility_status",
                &[
                    "eligibility_datetime_utc".to_string(),
                    "item_id".to_string(),
                    "eligibility".to_string(),
                    "message".to_string(),
                ],
                &[vec![
                    CellValue::Text("2024-06-01T00:00:00Z".to_string()),
                    CellValue::Text("17".to_string()),
                    CellValue::Integer(1),
                    CellValue::Null,
                ]],
            )
            .unwrap();

        let rows = store.fetch_table("eligibility_status").unwrap();
        assert_eq!(rows[0]["eligibility"], JsonValue::from(1));
    }
}
