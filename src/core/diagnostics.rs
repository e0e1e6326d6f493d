//! Diagnostic events emitted during a run
//!
//! The engine never configures logging itself. It reports what happens to a
//! [`DiagnosticSink`] handed to it at construction; the CLI forwards events to
//! `tracing`, tests capture them in a [`MemorySink`].

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{error, info, warn};

/// Something worth recording about a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    RunStarted {
        folders: Vec<PathBuf>,
        destination: PathBuf,
        policy: String,
        /// `YYMMDD` stamp used for every new name in this run
        date_stamp: String,
    },
    DuplicateFolderSkipped {
        folder: PathBuf,
    },
    FilesCollected {
        total: usize,
    },
    FileCopied {
        /// 1-based position in copy order
        position: usize,
        total: usize,
        old_name: String,
        new_name: String,
    },
    NoFilesFound,
    LogWritten {
        path: PathBuf,
        records: usize,
    },
    RunFailed {
        message: String,
    },
}

/// Receiver of [`DiagnosticEvent`]s
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent);
}

/// Forwards events to the `tracing` subscriber installed by the caller
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::RunStarted {
                folders,
                destination,
                policy,
                date_stamp,
            } => info!(
                folders = folders.len(),
                destination = %destination.display(),
                policy = %policy,
                date_stamp = %date_stamp,
                "Process started"
            ),
            DiagnosticEvent::DuplicateFolderSkipped { folder } => {
                warn!(folder = %folder.display(), "Source folder listed more than once; skipping repeat")
            }
            DiagnosticEvent::FilesCollected { total } => info!(total, "Collected source files"),
            DiagnosticEvent::FileCopied {
                position,
                total,
                old_name,
                new_name,
            } => info!(position, total, "Copied {} to {}", old_name, new_name),
            DiagnosticEvent::NoFilesFound => warn!("No files found in the selected folders; nothing to do"),
            DiagnosticEvent::LogWritten { path, records } => {
                info!(records, "Renaming process complete. Log saved to {}", path.display())
            }
            DiagnosticEvent::RunFailed { message } => error!("{}", message),
        }
    }
}

/// Keeps every event in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, event: &DiagnosticEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}
