//! # shopql-datastore
//!
//! SQLite-backed sales datastore for ShopQL.
//!
//! ## Overview
//!
//! Owns the three e-commerce tables (`sales_summary`, `ad_data`,
//! `eligibility_status`), their CSV ingestion, and read-only query
//! execution. The pieces are:
//!
//! - [`SalesStore`] - shared SQLite handle; fetches tables and runs
//!   SELECT-only statements, returning rows as JSON objects
//! - [`VALID_TABLES`] - the table allow-list enforced at the query boundary
//! - [`loader`] - CSV ingestion with typed conversion outcomes and a
//!   per-load [`LoadReport`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shopql_datastore::{SalesStore, loader};
//!
//! # fn run() -> shopql_datastore::Result<()> {
//! let store = SalesStore::open("shopql.db")?;
//! loader::seed_from_dir(&store, "data/")?;
//! let rows = store.execute_select("SELECT SUM(total_sales) FROM sales_summary")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;
pub mod store;

pub use error::{DatastoreError, Result};
pub use loader::{CellOutcome, LoadReport};
pub use store::{CellValue, SalesStore, VALID_TABLES};
