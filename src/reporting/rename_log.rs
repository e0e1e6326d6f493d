//! The two-table rename log

use std::collections::BTreeSet;

use crate::scanner::natural_sort::{compare_names, SortMode};

pub const DEFAULT_LOG_FILE_NAME: &str = "rename_log.xlsx";
pub const SHEET_BY_NEW_NAME: &str = "Sorted by New Name";
pub const SHEET_BY_OLD_NAME: &str = "Sorted by Original Name";
pub const NEW_NAME_HEADER: &str = "New Name";
pub const OLD_NAME_HEADER: &str = "Old Name";

/// One copied file: where it came from and what it is called now
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenameRecord {
    pub old_name: String,
    pub new_name: String,
}

/// A named two-column table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTable {
    pub name: &'static str,
    pub header: [&'static str; 2],
    pub rows: Vec<[String; 2]>,
}

/// Both views of the record set, ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameLog {
    by_new_name: LogTable,
    by_old_name: LogTable,
}

impl RenameLog {
    /// Build the two tables from the records of a run
    ///
    /// Both tables hold every record. The first is keyed on the new name, the
    /// second on the old name, each sorted numeric-aware over all digit runs.
    pub fn from_records(records: &[RenameRecord]) -> Self {
        let mut by_new: Vec<&RenameRecord> = records.iter().collect();
        by_new.sort_by(|a, b| compare_names(&a.new_name, &b.new_name, SortMode::FullTuple));

        let mut by_old: Vec<&RenameRecord> = records.iter().collect();
        by_old.sort_by(|a, b| {
            compare_names(&a.old_name, &b.old_name, SortMode::FullTuple)
                .then_with(|| compare_names(&a.new_name, &b.new_name, SortMode::FullTuple))
        });

        Self {
            by_new_name: LogTable {
                name: SHEET_BY_NEW_NAME,
                header: [NEW_NAME_HEADER, OLD_NAME_HEADER],
                rows: by_new
                    .into_iter()
                    .map(|r| [r.new_name.clone(), r.old_name.clone()])
                    .collect(),
            },
            by_old_name: LogTable {
                name: SHEET_BY_OLD_NAME,
                header: [OLD_NAME_HEADER, NEW_NAME_HEADER],
                rows: by_old
                    .into_iter()
                    .map(|r| [r.old_name.clone(), r.new_name.clone()])
                    .collect(),
            },
        }
    }

    pub fn by_new_name(&self) -> &LogTable {
        &self.by_new_name
    }

    pub fn by_old_name(&self) -> &LogTable {
        &self.by_old_name
    }

    /// Tables in the order they are written
    pub fn tables(&self) -> [&LogTable; 2] {
        [&self.by_new_name, &self.by_old_name]
    }

    pub fn len(&self) -> usize {
        self.by_new_name.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_new_name.rows.is_empty()
    }

    /// `(old, new)` pairs of the new-name table
    pub fn pairs_by_new_name(&self) -> BTreeSet<(String, String)> {
        self.by_new_name
            .rows
            .iter()
            .map(|[new, old]| (old.clone(), new.clone()))
            .collect()
    }

    /// `(old, new)` pairs of the old-name table
    pub fn pairs_by_old_name(&self) -> BTreeSet<(String, String)> {
        self.by_old_name
            .rows
            .iter()
            .map(|[old, new]| (old.clone(), new.clone()))
            .collect()
    }
}
