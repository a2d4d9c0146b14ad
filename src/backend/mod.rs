//! # Spreadsheet Backend Module
//!
//! The remote tabular service the record store reads and writes. A backend
//! is bound to one spreadsheet and addressed with A1 range strings.
//!
//! - [`google::GoogleSheetsBackend`] talks to the Google Sheets v4 REST API
//! - [`memory::MemoryBackend`] keeps sheets in process, for tests and local runs

use crate::error::SheetStoreError;
use crate::spreadsheet::Grid;
use thiserror::Error;

pub mod auth;
pub mod google;
pub mod memory;

/// Errors raised by a backend call. Transport, status and decode failures
/// are reported as-is and never retried.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend returned HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Backend transport failed: {0}")]
    Transport(String),

    #[error("Unexpected backend response: {0}")]
    Decode(String),

    #[error("Invalid backend url '{0}'")]
    InvalidUrl(String),
}

/// How the backend interprets written values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueInput {
    /// Stored literally, never parsed as a formula
    Raw,
    /// Parsed as if typed by a user, so formulas and numbers are evaluated
    UserEntered,
}

impl ValueInput {
    /// Returns the wire name of the option.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueInput::Raw => "RAW",
            ValueInput::UserEntered => "USER_ENTERED",
        }
    }
}

/// Range-level operations offered by a spreadsheet service.
pub trait SheetsBackend {
    /// Reads the values of a sheet-qualified range. Trailing empty cells and
    /// trailing empty rows may be omitted.
    fn read_range(&self, range: &str) -> Result<Grid, SheetStoreError>;

    /// Overwrites the cells of a range, starting at its top-left corner.
    fn update_range(&self, range: &str, rows: Grid, input: ValueInput) -> Result<(), SheetStoreError>;

    /// Appends rows after the last non-empty row of the table found in `range`.
    fn append_rows(&self, range: &str, rows: Grid, input: ValueInput) -> Result<(), SheetStoreError>;

    /// Resolves a sheet title to its numeric sheet id.
    fn sheet_id(&self, title: &str) -> Result<Option<i64>, SheetStoreError>;

    /// Removes physical rows `[start, end)` (0-based) and shifts later rows up.
    fn delete_rows(&self, sheet_id: i64, start: usize, end: usize) -> Result<(), SheetStoreError>;
}

impl<B: SheetsBackend + ?Sized> SheetsBackend for &B {
    fn read_range(&self, range: &str) -> Result<Grid, SheetStoreError> {
        (**self).read_range(range)
    }

    fn update_range(&self, range: &str, rows: Grid, input: ValueInput) -> Result<(), SheetStoreError> {
        (**self).update_range(range, rows, input)
    }

    fn append_rows(&self, range: &str, rows: Grid, input: ValueInput) -> Result<(), SheetStoreError> {
        (**self).append_rows(range, rows, input)
    }

    fn sheet_id(&self, title: &str) -> Result<Option<i64>, SheetStoreError> {
        (**self).sheet_id(title)
    }

    fn delete_rows(&self, sheet_id: i64, start: usize, end: usize) -> Result<(), SheetStoreError> {
        (**self).delete_rows(sheet_id, start, end)
    }
}
