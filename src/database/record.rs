use crate::error::SheetStoreError;
use crate::spreadsheet::Grid;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Partial mapping of column name to new value, as passed to update-by-key.
pub type Updates = BTreeMap<String, String>;

/// One data row represented as a column-name to string-value mapping.
///
/// Records produced by a table read always carry every header column;
/// absent cells are stored as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    /// Builds a record from `(column, value)` pairs. Later pairs win on duplicate columns.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Record(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Returns the value of a column, or None if the record has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(|value| value.as_str())
    }

    /// Returns the value of a column, or an empty string if absent.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Returns the value of a column, falling back to `default` when absent or empty.
    pub fn value_or(&self, column: &str, default: &str) -> String {
        match self.value(column) {
            "" => default.to_owned(),
            value => value.to_owned(),
        }
    }

    /// Column names in lexical order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|key| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Orders the values of this record by a declared column list.
    /// Columns the record lacks become empty strings.
    pub fn to_row(&self, columns: &[&str]) -> Vec<String> {
        columns.iter().map(|column| self.value(column).to_owned()).collect()
    }

    /// Decodes the record into a typed view.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, SheetStoreError> {
        Ok(serde_json::from_value(serde_json::to_value(&self.0)?)?)
    }
}

impl From<BTreeMap<String, String>> for Record {
    fn from(value: BTreeMap<String, String>) -> Self {
        Record(value)
    }
}

impl From<Record> for Updates {
    fn from(value: Record) -> Self {
        value.0
    }
}

/// Zips a row against the header row. Out-of-range cells default to an empty string.
///
/// If the header repeats a column name, the rightmost cell wins.
pub fn row_to_record(header: &[String], row: &[String]) -> Record {
    Record(
        header
            .iter()
            .enumerate()
            .map(|(index, name)| (name.to_owned(), row.get(index).cloned().unwrap_or_default()))
            .collect(),
    )
}

/// Maps a grid whose first row is the header to records, in physical row order.
/// A grid with no data rows yields no records.
pub fn grid_to_records(grid: &Grid) -> Vec<Record> {
    match grid.split_first() {
        Some((header, rows)) if !rows.is_empty() => {
            rows.iter().map(|row| row_to_record(header, row)).collect()
        }
        _ => Vec::new(),
    }
}
