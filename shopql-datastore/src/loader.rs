//! CSV ingestion with typed, observable conversion outcomes.
//!
//! Every cell conversion is classified as parsed, coerced, or left as text,
//! so cleanup (currency symbols, percent signs, defaulted blanks) shows up
//! in the [`LoadReport`] and in logs instead of being silently swallowed.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{DatastoreError, Result};
use crate::store::{CellValue, SalesStore, VALID_TABLES};

/// The outcome of converting one raw CSV cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellOutcome {
    /// The raw text converted directly, no cleanup needed.
    Parsed(CellValue),
    /// The value was recovered only after cleanup or defaulting.
    Coerced {
        /// The stored value.
        value: CellValue,
        /// The raw text as it appeared in the CSV.
        original: String,
    },
    /// The raw text was kept as an uninterpreted string.
    Text(String),
}

impl CellOutcome {
    /// The value that ends up in the database.
    fn into_value(self) -> CellValue {
        match self {
            CellOutcome::Parsed(value) => value,
            CellOutcome::Coerced { value, .. } => value,
            CellOutcome::Text(text) if text.is_empty() => CellValue::Null,
            CellOutcome::Text(text) => CellValue::Text(text),
        }
    }
}

/// How a column's cells are interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnKind {
    /// Kept as text even when it looks numeric.
    ItemId,
    /// Mapped onto a 0/1 flag.
    Eligibility,
    /// Every non-empty cell parses as a number (possibly after cleanup).
    Numeric,
    /// Anything else.
    Text,
}

/// Summary of one CSV-to-table load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Destination table.
    pub table: String,
    /// Normalized column names, in CSV order.
    pub columns: Vec<String>,
    /// Data rows read from the CSV.
    pub rows_read: usize,
    /// Rows inserted after deduplication.
    pub rows_inserted: usize,
    /// Exact duplicate rows dropped.
    pub duplicates_dropped: usize,
    /// Cells that converted directly.
    pub parsed_cells: usize,
    /// Cells recovered by cleanup or defaulting.
    pub coerced_cells: usize,
    /// Cells kept as text.
    pub text_cells: usize,
}

/// Load one CSV file into an allow-listed table, replacing its contents.
pub fn load_csv(store: &SalesStore, table: &str, path: impl AsRef<Path>) -> Result<LoadReport> {
    let path = path.as_ref();
    info!(table = %table, path = %path.display(), "loading CSV");
    load_from_reader(store, table, File::open(path)?)
}

/// Seed every allow-listed table from `<dir>/<table>.csv`, skipping tables
/// whose CSV is absent.
pub fn seed_from_dir(store: &SalesStore, dir: impl AsRef<Path>) -> Result<Vec<LoadReport>> {
    let mut reports = Vec::new();
    for table in VALID_TABLES {
        let path = dir.as_ref().join(format!("{table}.csv"));
        if path.exists() {
            reports.push(load_csv(store, table, &path)?);
        } else {
            warn!(table = %table, path = %path.display(), "no CSV found, skipping");
        }
    }
    Ok(reports)
}

fn load_from_reader<R: Read>(store: &SalesStore, table: &str, reader: R) -> Result<LoadReport> {
    if !SalesStore::is_valid_table(table) {
        return Err(DatastoreError::UnknownTable(table.to_string()));
    }

    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let columns: Vec<String> = csv_reader.headers()?.iter().map(normalize_header).collect();

    let mut records: Vec<Vec<String>> = Vec::new();
    for record in csv_reader.records() {
        records.push(record?.iter().map(str::to_string).collect());
    }
    let rows_read = records.len();

    // Exact duplicates are dropped on the raw records, keeping first occurrence.
    let mut seen = HashSet::new();
    records.retain(|record| seen.insert(record.clone()));
    let duplicates_dropped = rows_read - records.len();

    let kinds: Vec<ColumnKind> =
        (0..columns.len()).map(|col| column_kind(&columns[col], table, &records, col)).collect();

    let mut report = LoadReport {
        table: table.to_string(),
        columns: columns.clone(),
        rows_read,
        rows_inserted: 0,
        duplicates_dropped,
        parsed_cells: 0,
        coerced_cells: 0,
        text_cells: 0,
    };
    let mut coerced_per_column = vec![0usize; columns.len()];

    let mut rows: Vec<Vec<CellValue>> = Vec::with_capacity(records.len());
    for record in &records {
        let mut row = Vec::with_capacity(columns.len());
        for (col, kind) in kinds.iter().enumerate() {
            let raw = record.get(col).map(String::as_str).unwrap_or("");
            let outcome = convert_cell(*kind, raw);
            match &outcome {
                CellOutcome::Parsed(_) => report.parsed_cells += 1,
                CellOutcome::Coerced { .. } => {
                    report.coerced_cells += 1;
                    coerced_per_column[col] += 1;
                }
                CellOutcome::Text(_) => report.text_cells += 1,
            }
            row.push(outcome.into_value());
        }
        rows.push(row);
    }

    for (col, count) in coerced_per_column.iter().enumerate() {
        if *count > 0 {
            warn!(
                table = %table,
                column = %columns[col],
                cells = count,
                "values recovered by cleanup or defaulting"
            );
        }
    }

    report.rows_inserted = store.replace_rows(table, &columns, &rows)?;
    info!(
        table = %table,
        rows = report.rows_inserted,
        duplicates = report.duplicates_dropped,
        coerced = report.coerced_cells,
        "CSV load complete"
    );
    Ok(report)
}

/// Trim, snake-case, lowercase, and keep only identifier characters.
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Decide how a column is interpreted, from its name and its cells.
///
/// `item_id` stays text even when it looks numeric; the eligibility flag has
/// its own mapping; any other column is numeric only when every non-empty
/// cell parses as a number after cleanup.
fn column_kind(header: &str, table: &str, records: &[Vec<String>], col: usize) -> ColumnKind {
    if header == "item_id" {
        return ColumnKind::ItemId;
    }
    if table == "eligibility_status" && header == "eligibility" {
        return ColumnKind::Eligibility;
    }

    let mut saw_value = false;
    for record in records {
        let raw = record.get(col).map(String::as_str).unwrap_or("");
        if raw.is_empty() {
            continue;
        }
        saw_value = true;
        if clean_numeric(raw).parse::<f64>().is_err() {
            return ColumnKind::Text;
        }
    }
    if saw_value { ColumnKind::Numeric } else { ColumnKind::Text }
}

/// Convert one raw cell according to its column's kind.
fn convert_cell(kind: ColumnKind, raw: &str) -> CellOutcome {
    match kind {
        ColumnKind::ItemId | ColumnKind::Text => CellOutcome::Text(raw.to_string()),
        ColumnKind::Eligibility => match raw.to_lowercase().as_str() {
            "true" | "yes" | "eligible" | "1" => CellOutcome::Parsed(CellValue::Integer(1)),
            "false" | "no" | "not eligible" | "0" => CellOutcome::Parsed(CellValue::Integer(0)),
            _ => CellOutcome::Coerced {
                value: CellValue::Integer(0),
                original: raw.to_string(),
            },
        },
        ColumnKind::Numeric => {
            if raw.is_empty() {
                return CellOutcome::Coerced {
                    value: CellValue::Number(0.0),
                    original: raw.to_string(),
                };
            }
            if let Ok(value) = raw.parse::<f64>() {
                return CellOutcome::Parsed(CellValue::Number(value));
            }
            match clean_numeric(raw).parse::<f64>() {
                Ok(value) => CellOutcome::Coerced { value: CellValue::Number(value), original: raw.to_string() },
                Err(_) => CellOutcome::Text(raw.to_string()),
            }
        }
    }
}

/// Strip currency symbols, thousands separators, percent signs, and spaces.
fn clean_numeric(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '₹' | '$' | ',' | '%' | ' ')).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::Value as JsonValue;

    use super::*;

    fn load_str(store: &SalesStore, table: &str, csv: &str) -> LoadReport {
        load_from_reader(store, table, csv.as_bytes()).unwrap()
    }

    #[test]
    fn normalizes_messy_headers() {
        assert_eq!(normalize_header(" Total Sales "), "total_sales");
        assert_eq!(normalize_header("Item ID"), "item_id");
        assert_eq!(normalize_header("eligibility_datetime_utc"), "eligibility_datetime_utc");
    }

    #[test]
    fn cleans_currency_and_percent_noise() {
        assert_eq!(clean_numeric("₹1,234.50"), "1234.50");
        assert_eq!(clean_numeric("$99"), "99");
        assert_eq!(clean_numeric("12 %"), "12");
    }

    #[test]
    fn currency_cells_are_coerced_not_lost() {
        let store = SalesStore::open_in_memory().unwrap();
        let report = load_str(
            &store,
            "sales_summary",
            "Date,Item ID,Total Sales,Total Units Ordered\n\
             2024-06-01,17,\"₹1,234.50\",4\n\
             2024-06-02,17,200,2\n",
        );

        assert_eq!(report.rows_inserted, 2);
        assert_eq!(report.coerced_cells, 1);

        let rows = store.fetch_table("sales_summary").unwrap();
        assert_eq!(rows[0]["total_sales"], JsonValue::from(1234.5));
        assert_eq!(rows[1]["total_sales"], JsonValue::from(200.0));
    }

    #[test]
    fn item_id_stays_text_even_when_numeric() {
        let store = SalesStore::open_in_memory().unwrap();
        load_str(
            &store,
            "sales_summary",
            "date,item_id,total_sales,total_units_ordered\n2024-06-01,000123,10,1\n",
        );

        let rows = store.fetch_table("sales_summary").unwrap();
        assert_eq!(rows[0]["item_id"], JsonValue::String("000123".to_string()));
    }

    #[test]
    fn eligibility_strings_map_onto_flags() {
        let store = SalesStore::open_in_memory().unwrap();
        let report = load_str(
            &store,
            "eligibility_status",
            "eligibility_datetime_utc,item_id,eligibility,message\n\
             2024-06-01T00:00:00Z,1,True,\n\
             2024-06-01T00:00:00Z,2,Not Eligible,suppressed listing\n\
             2024-06-01T00:00:00Z,3,banana,\n",
        );

        // "banana" is not a recognized flag and defaults to 0 with a warning.
        assert_eq!(report.coerced_cells, 1);

        let rows = store.fetch_table("eligibility_status").unwrap();
        assert_eq!(rows[0]["eligibility"], JsonValue::from(1));
        assert_eq!(rows[1]["eligibility"], JsonValue::from(0));
        assert_eq!(rows[2]["eligibility"], JsonValue::from(0));
        assert_eq!(rows[1]["message"], JsonValue::String("suppressed listing".to_string()));
        assert_eq!(rows[0]["message"], JsonValue::Null);
    }

    #[test]
    fn blank_numeric_cells_default_to_zero() {
        let store = SalesStore::open_in_memory().unwrap();
        let report = load_str(
            &store,
            "ad_data",
            "date,item_id,ad_sales,impressions,ad_spend,clicks,units_sold\n\
             2024-06-01,17,,100,5.5,3,1\n\
             2024-06-02,17,7.5,50,2.0,1,1\n",
        );

        assert_eq!(report.coerced_cells, 1);
        let rows = store.fetch_table("ad_data").unwrap();
        assert_eq!(rows[0]["ad_sales"], JsonValue::from(0.0));
        assert_eq!(rows[1]["ad_sales"], JsonValue::from(7.5));
    }

    #[test]
    fn mixed_columns_stay_text() {
        let store = SalesStore::open_in_memory().unwrap();
        let report = load_str(
            &store,
            "eligibility_status",
            "eligibility_datetime_utc,item_id,eligibility,message\n\
             2024-06-01T00:00:00Z,1,true,all good\n\
             2024-06-02T00:00:00Z,2,false,99\n",
        );

        // "message" mixes text and numerics, so the whole column stays text.
        assert!(report.text_cells > 0);
        let rows = store.fetch_table("eligibility_status").unwrap();
        assert_eq!(rows[1]["message"], JsonValue::String("99".to_string()));
    }

    #[test]
    fn exact_duplicate_rows_are_dropped() {
        let store = SalesStore::open_in_memory().unwrap();
        let report = load_str(
            &store,
            "sales_summary",
            "date,item_id,total_sales,total_units_ordered\n\
             2024-06-01,17,10,1\n\
             2024-06-01,17,10,1\n\
             2024-06-02,17,20,2\n",
        );

        assert_eq!(report.rows_read, 3);
        assert_eq!(report.duplicates_dropped, 1);
        assert_eq!(report.rows_inserted, 2);
        assert_eq!(store.row_count("sales_summary").unwrap(), 2);
    }

    #[test]
    fn seed_from_dir_loads_present_tables_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("sales_summary.csv")).unwrap();
        writeln!(file, "date,item_id,total_sales,total_units_ordered").unwrap();
        writeln!(file, "2024-06-01,17,10,1").unwrap();
        drop(file);

        let store = SalesStore::open_in_memory().unwrap();
        let reports = seed_from_dir(&store, dir.path()).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].table, "sales_summary");
        assert_eq!(store.row_count("sales_summary").unwrap(), 1);
        assert_eq!(store.row_count("ad_data").unwrap(), 0);
    }

    #[test]
    fn rejects_unknown_table() {
        let store = SalesStore::open_in_memory().unwrap();
        let err = load_from_reader(&store, "users", "a,b\n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatastoreError::UnknownTable(_)));
    }
}
