use crate::backend::SheetsBackend;
use crate::backend::ValueInput;
use crate::database::criteria::filter;
use crate::database::record::grid_to_records;
use crate::database::record::Record;
use crate::database::record::Updates;
use crate::database::StoreError;
use crate::error::SheetStoreError;
use crate::spreadsheet::cell;
use crate::spreadsheet::range::Range;
use crate::spreadsheet::range::SheetRange;
use crate::spreadsheet::Grid;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Sheet-backed record store.
///
/// Stateless between calls: every operation fetches the authoritative grid
/// again, and nothing is cached. There is no locking or version check, so
/// concurrent writers to the same row race and the last write wins.
pub struct RecordStore<B> {
    backend: B,
}

impl<B: SheetsBackend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        RecordStore { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads a sheet-qualified range such as `Personas!A:J` and maps every data
    /// row against the header row.
    ///
    /// A range with no data rows (empty, or header only) yields an empty list.
    pub fn list(&self, range: &str) -> Result<Vec<Record>, SheetStoreError> {
        debug!(range, "listing records");
        let grid = self.backend.read_range(range)?;
        Ok(grid_to_records(&grid))
    }

    /// Lists a range, keeping only records whose `column` equals `value` when a value is given.
    pub fn list_where(&self, range: &str, column: &str, value: Option<&str>) -> Result<Vec<Record>, SheetStoreError> {
        let records = self.list(range)?;
        Ok(match value {
            Some(value) => filter(records, column, value),
            None => records,
        })
    }

    /// Returns the first record whose key column equals `key_value`.
    pub fn find(&self, range: &str, key_column: &str, key_value: &str) -> Result<Option<Record>, SheetStoreError> {
        Ok(self
            .list(range)?
            .into_iter()
            .find(|record| record.value(key_column) == key_value))
    }

    /// Appends one row of positional values after the table's last row.
    ///
    /// Values are written as user input, so formulas are evaluated. No
    /// uniqueness check is made: a duplicate identifier yields a second record
    /// with the same key.
    pub fn append(&self, table: &str, values: Vec<String>) -> Result<(), SheetStoreError> {
        let anchor = SheetRange::new(table, Range {
            col_lower_bound: Some(0),
            col_upper_bound: Some(0),
            ..Range::default()
        });
        self.backend
            .append_rows(&anchor.to_string(), vec![values], ValueInput::UserEntered)?;
        info!(table, "appended record");
        Ok(())
    }

    /// Appends a record, laying its values out in the declared column order.
    pub fn append_record(&self, table: &str, columns: &[&str], record: &Record) -> Result<(), SheetStoreError> {
        self.append(table, record.to_row(columns))
    }

    /// Overwrites the given fields of the first record whose key column equals
    /// `key_value`. Every other cell of that row is written back unchanged;
    /// update fields that are not header columns are ignored.
    ///
    /// Returns the 1-based physical row number that was written.
    pub fn update_by_key(
        &self,
        table: &str,
        key_column: &str,
        key_value: &str,
        updates: &Updates,
    ) -> Result<usize, SheetStoreError> {
        let grid = self.backend.read_range(&SheetRange::whole(table).to_string())?;
        let row = locate(&grid, key_column, key_value)?;
        let header = &grid[0];
        let replacement: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(col, name)| match updates.get(name) {
                Some(value) => value.to_owned(),
                None => cell(&grid, row, col).to_owned(),
            })
            .collect();

        let target = SheetRange::new(table, Range::row_span(row, 0, header.len() - 1));
        debug!(range = %target, "overwriting row");
        self.backend
            .update_range(&target.to_string(), vec![replacement], ValueInput::Raw)?;
        info!(table, key_column, key_value, row = row + 1, "updated record");
        Ok(row + 1)
    }

    /// Physically removes the first row whose key column equals `key_value`;
    /// later rows shift up by one and the header is left alone.
    pub fn delete_by_key(&self, table: &str, key_column: &str, key_value: &str) -> Result<(), SheetStoreError> {
        let sheet_id = self
            .backend
            .sheet_id(table)?
            .ok_or_else(|| StoreError::TableNotFound(table.to_owned()))?;
        let grid = self.backend.read_range(&SheetRange::whole(table).to_string())?;
        let row = locate(&grid, key_column, key_value)?;
        self.backend.delete_rows(sheet_id, row, row + 1)?;
        info!(table, key_column, key_value, row = row + 1, "deleted record");
        Ok(())
    }

    /// Applies the same updates to several keys, one `update_by_key` at a time.
    ///
    /// Stops at the first failure. Rows already written stay written; the
    /// error reports how many were applied.
    pub fn update_many(
        &self,
        table: &str,
        key_column: &str,
        key_values: &[&str],
        updates: &Updates,
    ) -> Result<usize, SheetStoreError> {
        for (applied, key_value) in key_values.iter().enumerate() {
            if let Err(error) = self.update_by_key(table, key_column, key_value, updates) {
                warn!(table, key_value, applied, total = key_values.len(), %error, "bulk update stopped");
                return Err(StoreError::PartialUpdate {
                    applied,
                    total: key_values.len(),
                    source: Box::new(error),
                }
                .into());
            }
        }
        Ok(key_values.len())
    }
}

/// Finds the grid index of the first data row whose key cell equals `key_value`.
/// Cells the backend omitted never match, so an empty key cannot hit a blank row.
fn locate(grid: &Grid, key_column: &str, key_value: &str) -> Result<usize, StoreError> {
    let header = grid.first().map(|row| row.as_slice()).unwrap_or(&[]);
    let col = header
        .iter()
        .position(|name| name == key_column)
        .ok_or_else(|| StoreError::ColumnNotFound(key_column.to_owned()))?;
    (1..grid.len())
        .find(|row| grid[*row].get(col).map(String::as_str) == Some(key_value))
        .ok_or_else(|| StoreError::RecordNotFound {
            column: key_column.to_owned(),
            value: key_value.to_owned(),
        })
}
