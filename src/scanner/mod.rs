//! Source file collection and filename ordering

pub mod file_scanner;
pub mod natural_sort;

pub use file_scanner::{collect_source_files, SourceFile};
pub use natural_sort::{compare_names, SortMode};
