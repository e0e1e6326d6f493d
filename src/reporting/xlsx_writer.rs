//! Spreadsheet output for the rename log

use std::io;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use super::rename_log::{LogTable, RenameLog};

const NAME_COLUMN_WIDTH: f64 = 36.0;

/// Failure while writing a log file
#[derive(Debug, Error)]
pub enum LogWriteError {
    #[error("spreadsheet error")]
    Xlsx(#[from] XlsxError),
    #[error("io error")]
    Io(#[from] io::Error),
}

/// Writes a [`RenameLog`] to a single file
pub trait LogWriter: Send + Sync {
    fn write(&self, path: &Path, log: &RenameLog) -> Result<(), LogWriteError>;
}

/// Writes one worksheet per log table into an `.xlsx` workbook
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxLogWriter;

impl LogWriter for XlsxLogWriter {
    fn write(&self, path: &Path, log: &RenameLog) -> Result<(), LogWriteError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for table in log.tables() {
            write_table(&mut workbook, table, &header_format)?;
        }

        workbook.save(path)?;
        Ok(())
    }
}

fn write_table(workbook: &mut Workbook, table: &LogTable, header_format: &Format) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(table.name)?;

    for (col, title) in table.header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, header_format)?;
        worksheet.set_column_width(col as u16, NAME_COLUMN_WIDTH)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (row, cells) in table.rows.iter().enumerate() {
        let row = row as u32 + 1;
        for (col, value) in cells.iter().enumerate() {
            worksheet.write_string(row, col as u16, value.as_str())?;
        }
    }

    Ok(())
}
