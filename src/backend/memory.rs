use crate::backend::BackendError;
use crate::backend::SheetsBackend;
use crate::backend::ValueInput;
use crate::error::SheetStoreError;
use crate::spreadsheet::range::SheetRange;
use crate::spreadsheet::Grid;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// A sheet held in memory.
#[derive(Clone, Debug)]
struct MemorySheet {
    id: i64,
    title: String,
    rows: Grid,
}

impl MemorySheet {
    /// Index just past the last row that has a non-empty cell.
    fn used_rows(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_empty()))
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    fn write(&mut self, row_lower: usize, col_lower: usize, rows: Grid) {
        for (offset, values) in rows.into_iter().enumerate() {
            let row = row_lower + offset;
            if self.rows.len() <= row {
                self.rows.resize(row + 1, Vec::new());
            }
            let cells = &mut self.rows[row];
            if cells.len() < col_lower + values.len() {
                cells.resize(col_lower + values.len(), String::new());
            }
            for (col, value) in values.into_iter().enumerate() {
                cells[col_lower + col] = value;
            }
        }
    }
}

/// An in-process spreadsheet with the same range semantics as the remote service.
///
/// Reads trim trailing empty cells and rows the way the Sheets API does, so
/// ragged rows reach the store exactly as they would in production. Value
/// input options are accepted but formulas are never evaluated.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    sheets: Mutex<Vec<MemorySheet>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Adds a sheet with initial content and returns the backend, for fixtures.
    pub fn with_sheet<R, C>(self, title: &str, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        self.add_sheet(title, crate::spreadsheet::grid_from(rows));
        self
    }

    /// Adds a sheet and returns its sheet id. Ids are assigned in creation order from 0.
    pub fn add_sheet(&self, title: &str, rows: Grid) -> i64 {
        let mut sheets = self.sheets.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = sheets.len() as i64;
        sheets.push(MemorySheet {
            id,
            title: title.to_owned(),
            rows,
        });
        id
    }

    /// Snapshot of a sheet's raw cells, or None if there is no such sheet.
    pub fn grid(&self, title: &str) -> Option<Grid> {
        let sheets = self.sheets.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sheets
            .iter()
            .find(|sheet| sheet.title == title)
            .map(|sheet| sheet.rows.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<MemorySheet>>, SheetStoreError> {
        self.sheets
            .lock()
            .map_err(|_| BackendError::Transport("memory backend lock poisoned".to_owned()).into())
    }

    fn unknown_range(range: &str) -> SheetStoreError {
        BackendError::Status {
            code: 400,
            message: format!("Unable to parse range: {range}"),
        }
        .into()
    }
}

impl SheetsBackend for MemoryBackend {
    fn read_range(&self, range: &str) -> Result<Grid, SheetStoreError> {
        let target = SheetRange::parse(range)?;
        let sheets = self.lock()?;
        let sheet = sheets
            .iter()
            .find(|sheet| sheet.title == target.sheet)
            .ok_or_else(|| Self::unknown_range(range))?;

        let row_lower = target.range.row_lower_bound.unwrap_or(0);
        let row_upper = target.range.row_upper_bound.map(|row| row + 1).unwrap_or(sheet.rows.len());
        let col_lower = target.range.col_lower_bound.unwrap_or(0);
        let col_upper = target.range.col_upper_bound.map(|col| col + 1).unwrap_or(usize::MAX);

        let mut grid: Grid = sheet
            .rows
            .iter()
            .take(row_upper)
            .skip(row_lower)
            .map(|row| {
                let mut cells: Vec<String> = row
                    .iter()
                    .take(col_upper)
                    .skip(col_lower)
                    .cloned()
                    .collect();
                while cells.last().map(|cell| cell.is_empty()).unwrap_or(false) {
                    cells.pop();
                }
                cells
            })
            .collect();
        while grid.last().map(|row| row.is_empty()).unwrap_or(false) {
            grid.pop();
        }
        Ok(grid)
    }

    fn update_range(&self, range: &str, rows: Grid, _input: ValueInput) -> Result<(), SheetStoreError> {
        let target = SheetRange::parse(range)?;
        let mut sheets = self.lock()?;
        let sheet = sheets
            .iter_mut()
            .find(|sheet| sheet.title == target.sheet)
            .ok_or_else(|| Self::unknown_range(range))?;
        sheet.write(
            target.range.row_lower_bound.unwrap_or(0),
            target.range.col_lower_bound.unwrap_or(0),
            rows,
        );
        Ok(())
    }

    fn append_rows(&self, range: &str, rows: Grid, _input: ValueInput) -> Result<(), SheetStoreError> {
        let target = SheetRange::parse(range)?;
        let mut sheets = self.lock()?;
        let sheet = sheets
            .iter_mut()
            .find(|sheet| sheet.title == target.sheet)
            .ok_or_else(|| Self::unknown_range(range))?;
        let row_lower = sheet.used_rows();
        sheet.write(row_lower, target.range.col_lower_bound.unwrap_or(0), rows);
        Ok(())
    }

    fn sheet_id(&self, title: &str) -> Result<Option<i64>, SheetStoreError> {
        let sheets = self.lock()?;
        Ok(sheets.iter().find(|sheet| sheet.title == title).map(|sheet| sheet.id))
    }

    fn delete_rows(&self, sheet_id: i64, start: usize, end: usize) -> Result<(), SheetStoreError> {
        let mut sheets = self.lock()?;
        let sheet = sheets
            .iter_mut()
            .find(|sheet| sheet.id == sheet_id)
            .ok_or_else(|| BackendError::Status {
                code: 400,
                message: format!("No grid with id: {sheet_id}"),
            })?;
        if start >= end || end > sheet.rows.len() {
            return Err(BackendError::Status {
                code: 400,
                message: format!("Invalid row span {start}..{end}"),
            }
            .into());
        }
        sheet.rows.drain(start..end);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::grid_from;

    fn backend() -> MemoryBackend {
        MemoryBackend::new()
            .with_sheet("Personas", [
                vec!["persona_id", "name", "status"],
                vec!["p1", "Ava", ""],
                vec!["p2", "", ""],
            ])
            .with_sheet("Jobs", Vec::<Vec<&str>>::new())
    }

    #[test]
    fn read_trims_trailing_cells() {
        let grid = backend().read_range("Personas!A:C").unwrap();
        assert_eq!(grid, grid_from([
            vec!["persona_id", "name", "status"],
            vec!["p1", "Ava"],
            vec!["p2"],
        ]));
    }

    #[test]
    fn read_respects_column_bounds() {
        let grid = backend().read_range("Personas!B:B").unwrap();
        assert_eq!(grid, grid_from([vec!["name"], vec!["Ava"]]));
    }

    #[test]
    fn read_unknown_sheet_fails() {
        assert!(backend().read_range("Missing!A:C").is_err());
    }

    #[test]
    fn append_goes_after_last_used_row() {
        let backend = backend();
        backend.update_range("Personas!A4:C4", grid_from([vec!["", "", ""]]), ValueInput::Raw).unwrap();
        backend
            .append_rows("Personas!A:A", grid_from([vec!["p3", "Mia", "active"]]), ValueInput::UserEntered)
            .unwrap();
        let grid = backend.grid("Personas").unwrap();
        assert_eq!(grid[3], vec!["p3", "Mia", "active"]);
    }

    #[test]
    fn append_to_empty_sheet() {
        let backend = backend();
        backend.append_rows("Jobs!A:A", grid_from([vec!["job_id"]]), ValueInput::UserEntered).unwrap();
        assert_eq!(backend.read_range("Jobs").unwrap(), grid_from([vec!["job_id"]]));
    }

    #[test]
    fn update_writes_at_corner() {
        let backend = backend();
        backend.update_range("Personas!B3", grid_from([vec!["Zoe"]]), ValueInput::Raw).unwrap();
        assert_eq!(backend.grid("Personas").unwrap()[2], vec!["p2", "Zoe", ""]);
    }

    #[test]
    fn sheet_ids_and_row_deletion() {
        let backend = backend();
        assert_eq!(backend.sheet_id("Personas").unwrap(), Some(0));
        assert_eq!(backend.sheet_id("Jobs").unwrap(), Some(1));
        assert_eq!(backend.sheet_id("Nope").unwrap(), None);

        backend.delete_rows(0, 1, 2).unwrap();
        let grid = backend.grid("Personas").unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[1][0], "p2");

        assert!(backend.delete_rows(0, 1, 9).is_err());
        assert!(backend.delete_rows(7, 0, 1).is_err());
    }
}
