use crate::error::SheetStoreError;
use crate::spreadsheet::reference::col_to_index;
use crate::spreadsheet::reference::index_to_col;
use crate::spreadsheet::reference::row_to_index;
use regex::Regex;
use std::fmt::Display;
use std::fmt::Formatter;
use thiserror::Error;

/// Errors related to A1-style range parsing.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid range format '{0}'")]
    FormatError(String),
}

/// Represents an A1-style cell range with optional boundaries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Range {
    /// Lower row bound (0-based index), None for unbounded
    pub row_lower_bound: Option<usize>,
    /// Upper row bound (0-based index), None for unbounded
    pub row_upper_bound: Option<usize>,
    /// Lower column bound (0-based index), None for unbounded
    pub col_lower_bound: Option<usize>,
    /// Upper column bound (0-based index), None for unbounded
    pub col_upper_bound: Option<usize>,
}

impl Range {
    /// Creates a range covering a single row between two columns (inclusive).
    pub fn row_span(row: usize, col_lower: usize, col_upper: usize) -> Self {
        Range {
            row_lower_bound: Some(row),
            row_upper_bound: Some(row),
            col_lower_bound: Some(col_lower),
            col_upper_bound: Some(col_upper),
        }
    }

    /// Returns true if no bound is set, i.e. the range selects the entire sheet.
    pub fn is_unbounded(&self) -> bool {
        self.row_lower_bound.is_none()
            && self.row_upper_bound.is_none()
            && self.col_lower_bound.is_none()
            && self.col_upper_bound.is_none()
    }

    fn write_corner(f: &mut Formatter<'_>, col: Option<usize>, row: Option<usize>) -> std::fmt::Result {
        if let Some(col) = col {
            write!(f, "{}", index_to_col(col))?;
        }
        if let Some(row) = row {
            write!(f, "{}", row + 1)?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for Range {
    type Error = SheetStoreError;

    /// Parses an A1 range string (e.g., "A1", "B2:C5", "A:J", "1:10").
    /// Supports single cells, ranges, and partial ranges (columns or rows only).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let pattern = Regex::new(r"^([A-Z]*)(\d*)(:([A-Z]*)(\d*))?$").expect("Hardcode regex pattern");
        let value = value.trim().to_ascii_uppercase();
        let captures = pattern
            .captures(value.as_str())
            .ok_or(RangeError::FormatError(value.to_owned()))?;
        Ok(Range {
            col_lower_bound: captures
                .get(1)
                .map(|matcher| matcher.as_str())
                .and_then(col_to_index),
            row_lower_bound: captures
                .get(2)
                .map(|matcher| matcher.as_str())
                .and_then(row_to_index),
            col_upper_bound: captures
                .get(4)
                .map(|matcher| matcher.as_str())
                .and_then(col_to_index),
            row_upper_bound: captures
                .get(5)
                .map(|matcher| matcher.as_str())
                .and_then(row_to_index),
        })
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Self::write_corner(f, self.col_lower_bound, self.row_lower_bound)?;
        if self.col_upper_bound.is_some() || self.row_upper_bound.is_some() {
            write!(f, ":")?;
            Self::write_corner(f, self.col_upper_bound, self.row_upper_bound)?;
        }
        Ok(())
    }
}

/// A range qualified by the sheet (tab) it belongs to, e.g. `Personas!A:J`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRange {
    /// Sheet title
    pub sheet: String,
    /// Cell range within the sheet
    pub range: Range,
}

impl SheetRange {
    /// Creates a range selecting the whole sheet.
    pub fn whole(sheet: &str) -> Self {
        SheetRange {
            sheet: sheet.to_owned(),
            range: Range::default(),
        }
    }

    pub fn new(sheet: &str, range: Range) -> Self {
        SheetRange {
            sheet: sheet.to_owned(),
            range,
        }
    }

    /// Parses `Sheet!A1:B2`, `'My Sheet'!A:C` or a bare sheet title.
    /// Quotes inside a quoted title are escaped by doubling them.
    pub fn parse(value: &str) -> Result<Self, SheetStoreError> {
        let pattern = Regex::new(r"^(?:'((?:[^']|'')+)'|([^'!]+))(?:!(.*))?$").expect("Hardcode regex pattern");
        let captures = pattern
            .captures(value.trim())
            .ok_or(RangeError::FormatError(value.to_owned()))?;
        let sheet = match (captures.get(1), captures.get(2)) {
            (Some(quoted), _) => quoted.as_str().replace("''", "'"),
            (None, Some(plain)) => plain.as_str().to_owned(),
            (None, None) => return Err(RangeError::FormatError(value.to_owned()).into()),
        };
        let range = match captures.get(3) {
            Some(range) => Range::try_from(range.as_str())?,
            None => Range::default(),
        };
        Ok(SheetRange { sheet, range })
    }

    /// Returns true if the sheet title must be quoted to be read back unambiguously.
    fn needs_quotes(&self) -> bool {
        let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Hardcode regex pattern");
        let reference = Regex::new(r"^[A-Za-z]{1,3}\d+$").expect("Hardcode regex pattern");
        !identifier.is_match(&self.sheet) || reference.is_match(&self.sheet)
    }
}

impl Display for SheetRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.needs_quotes() {
            write!(f, "'{}'", self.sheet.replace('\'', "''"))?;
        } else {
            write!(f, "{}", self.sheet)?;
        }
        if !self.range.is_unbounded() {
            write!(f, "!{}", self.range)?;
        }
        Ok(())
    }
}
