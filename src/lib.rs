//! Sample Blindfold Library
//!
//! Copies files from one or more source folders into a single destination
//! under randomized, date-stamped sequential names and writes a two-sheet
//! spreadsheet log that maps every new name back to its original.

pub mod config;
pub mod core;
pub mod error;
pub mod reporting;
pub mod scanner;

pub use crate::core::engine;
pub use crate::reporting::rename_log;
pub use crate::scanner::file_scanner;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{BlindConfig, DestinationPolicy};
    pub use crate::core::diagnostics::{DiagnosticEvent, DiagnosticSink, MemorySink, TracingSink};
    pub use crate::core::engine::{BlindingEngine, RunOutcome, RunReport, RunRequest};
    pub use crate::core::fs_ops::{EntryKind, FileOps, ListedEntry, LocalFs};
    pub use crate::core::naming::{plan_assignments, Assignment, NameTemplate, NamingPolicy, DEFAULT_BATCH_SIZE};
    pub use crate::error::{BlindError, BlindResult};
    pub use crate::reporting::rename_log::{LogTable, RenameLog, RenameRecord};
    pub use crate::reporting::xlsx_writer::{LogWriteError, LogWriter, XlsxLogWriter};
    pub use crate::scanner::file_scanner::{collect_source_files, SourceFile};
    pub use crate::scanner::natural_sort::{compare_names, numeric_key, sort_by_name, SortMode};
}
