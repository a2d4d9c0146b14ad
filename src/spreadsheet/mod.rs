//! # Spreadsheet Grid Module
//!
//! Grid-level vocabulary shared by the record store and the backends: the
//! 2-D string grid a range read returns, and A1-style range handling.

pub mod range;
pub mod reference;

/// A rectangular-ish block of cell values as returned by a range read.
///
/// Rows may be ragged: backends omit trailing empty cells, so a row can be
/// shorter than the header row.
pub type Grid = Vec<Vec<String>>;

/// Returns the cell at `(row, col)`, or an empty string when the row is short.
pub fn cell(grid: &Grid, row: usize, col: usize) -> &str {
    grid.get(row)
        .and_then(|cells| cells.get(col))
        .map(|value| value.as_str())
        .unwrap_or("")
}

/// Builds a grid from string literals, mainly for fixtures.
pub fn grid_from<R, C>(rows: R) -> Grid
where
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Into<String>,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_defaults_to_empty() {
        let grid = grid_from([vec!["a", "b"], vec!["c"]]);
        assert_eq!(cell(&grid, 0, 1), "b");
        assert_eq!(cell(&grid, 1, 1), "");
        assert_eq!(cell(&grid, 5, 0), "");
    }
}
