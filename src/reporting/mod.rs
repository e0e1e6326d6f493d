//! Rename log construction and output

pub mod rename_log;
pub mod xlsx_writer;

pub use rename_log::{RenameLog, RenameRecord};
pub use xlsx_writer::{LogWriter, XlsxLogWriter};
