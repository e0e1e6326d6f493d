//! Error types for a blinding run

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::reporting::xlsx_writer::LogWriteError;

/// Result type used throughout the library.
pub type BlindResult<T> = Result<T, BlindError>;

/// Errors produced while configuring or executing a blinding run.
///
/// An empty input set is not an error; see [`crate::core::engine::RunOutcome::NoFiles`].
#[derive(Debug, Error)]
pub enum BlindError {
    /// A configuration value was rejected before any file was touched.
    #[error("invalid configuration for `{field}`: {reason}")]
    Configuration {
        field: &'static str,
        reason: &'static str,
        value: Option<String>,
    },

    /// The destination folder exists and the policy requires a fresh one.
    #[error("destination folder already exists: {}", .path.display())]
    DestinationExists { path: PathBuf },

    /// A source folder could not be listed.
    #[error("failed to list source folder {}", .path.display())]
    Listing { path: PathBuf, source: io::Error },

    /// A source file name is not valid UTF-8 and cannot be logged verbatim.
    #[error("file name is not valid UTF-8: {}", .path.display())]
    UnsupportedName { path: PathBuf },

    /// The destination folder could not be created.
    #[error("failed to create destination folder {}", .path.display())]
    CreateDestination { path: PathBuf, source: io::Error },

    /// Copying one file failed; the run stopped at that file.
    #[error(
        "failed to copy {} to {} (file {position} of {total}, {copied} already copied)",
        .source_path.display(),
        .destination.display()
    )]
    CopyFailure {
        source_path: PathBuf,
        destination: PathBuf,
        /// 1-based position of the failed file in copy order.
        position: usize,
        total: usize,
        copied: usize,
        source: io::Error,
    },

    /// The spreadsheet log could not be written. The copied files stay in place.
    #[error(
        "failed to write rename log {}; {copied} copied file(s) remain in the destination without a log",
        .path.display()
    )]
    LogWrite {
        path: PathBuf,
        copied: usize,
        source: LogWriteError,
    },

    /// A JSON configuration preset could not be opened.
    #[error("failed to read configuration preset {}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    /// A JSON configuration preset did not parse.
    #[error("failed to parse configuration preset {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl BlindError {
    pub(crate) fn configuration(
        field: &'static str,
        reason: &'static str,
        value: Option<String>,
    ) -> Self {
        Self::Configuration {
            field,
            reason,
            value,
        }
    }

    /// Whether files may have been left in the destination by this failure.
    pub fn leaves_partial_output(&self) -> bool {
        match self {
            Self::CopyFailure { copied, .. } => *copied > 0,
            Self::LogWrite { .. } => true,
            _ => false,
        }
    }
}
