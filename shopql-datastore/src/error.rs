//! Error types for the `shopql-datastore` crate.

use thiserror::Error;

/// Errors that can occur in datastore operations.
#[derive(Debug, Error)]
pub enum DatastoreError {
    /// The requested table is not on the allow-list.
    #[error("Invalid table name.")]
    UnknownTable(String),

    /// The statement is not a read-only SELECT.
    #[error("only SELECT statements are allowed, got: {0}")]
    NotReadOnly(String),

    /// The connection lock was poisoned by a panicking holder.
    #[error("database lock poisoned: {0}")]
    Lock(String),

    /// An underlying SQLite failure.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// A CSV parse failure during ingestion.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A filesystem failure during ingestion.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A convenience result type for datastore operations.
pub type Result<T> = std::result::Result<T, DatastoreError>;
