use crate::database::record::Record;

/// Value that leaves a constraint unapplied, as used by the dashboard filters.
pub const ANY: &str = "all";

/// Criteria for filtering records already fetched from a table.
///
/// Every constraint is a column-equality test; a record is accepted when
/// all constraints hold. Constraints whose value is [`ANY`] are ignored.
#[derive(Clone, Debug, Default)]
pub struct Criteria {
    constraints: Vec<(String, String)>,
}

impl Criteria {
    pub fn new() -> Self {
        Criteria::default()
    }

    /// Adds a `column == value` constraint.
    pub fn with(mut self, column: &str, value: &str) -> Self {
        if value != ANY {
            self.constraints.push((column.to_owned(), value.to_owned()));
        }
        self
    }

    /// Adds a constraint only when a value is given.
    pub fn with_optional(self, column: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with(column, value),
            None => self,
        }
    }

    /// Checks if a record matches every constraint.
    pub fn accept(&self, record: &Record) -> bool {
        self.constraints
            .iter()
            .all(|(column, value)| record.value(column) == value)
    }

    /// Keeps the accepted records, preserving order.
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        records.into_iter().filter(|record| self.accept(record)).collect()
    }
}

/// Full-scan equality filter on one column.
pub fn filter(records: Vec<Record>, column: &str, value: &str) -> Vec<Record> {
    records.into_iter().filter(|record| record.value(column) == value).collect()
}

/// Counts records per distinct value of `column`, in order of first appearance.
pub fn count_by(records: &[Record], column: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        let value = record.value(column);
        match counts.iter_mut().find(|(key, _)| key == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.to_owned(), 1)),
        }
    }
    counts
}

/// Groups records by the value of `column`, in order of first appearance.
/// Records keep their relative order inside each group.
pub fn group_by(records: Vec<Record>, column: &str) -> Vec<(String, Vec<Record>)> {
    let mut groups: Vec<(String, Vec<Record>)> = Vec::new();
    for record in records {
        let key = record.value(column).to_owned();
        match groups.iter_mut().find(|(group, _)| *group == key) {
            Some((_, members)) => members.push(record),
            None => groups.push((key, vec![record])),
        }
    }
    groups
}
