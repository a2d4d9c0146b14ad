//! # Record Store Module
//!
//! Maps header-defined sheets to string records and performs point
//! mutations addressed by a key column rather than a physical row.

use thiserror::Error;

pub mod criteria;
pub mod record;
pub mod store;

/// Errors raised by the record store itself, as opposed to the backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The key column is not part of the header row
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// No data row carries the key value
    #[error("Row with {column}={value} not found")]
    RecordNotFound { column: String, value: String },

    /// No physical sheet has the table's name
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    /// A serial bulk update stopped before every key was processed
    #[error("Bulk update stopped after {applied} of {total} rows: {source}")]
    PartialUpdate {
        applied: usize,
        total: usize,
        #[source]
        source: Box<crate::error::SheetStoreError>,
    },
}
