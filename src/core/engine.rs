//! The blinding engine: collect, plan, copy, log

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use rand::Rng;
use tokio::task::JoinHandle;

use super::diagnostics::{DiagnosticEvent, DiagnosticSink, TracingSink};
use super::fs_ops::{FileOps, LocalFs};
use super::naming::{plan_assignments, NameTemplate};
use crate::config::{BlindConfig, DestinationPolicy};
use crate::error::{BlindError, BlindResult};
use crate::reporting::rename_log::{RenameLog, RenameRecord};
use crate::reporting::xlsx_writer::{LogWriter, XlsxLogWriter};
use crate::scanner::file_scanner::{collect_source_files, dedup_folders};

/// Source folders and the destination for one run
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub folders: Vec<PathBuf>,
    pub destination: PathBuf,
}

impl RunRequest {
    pub fn new(folders: Vec<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            folders,
            destination: destination.into(),
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub destination: PathBuf,
    pub log_path: PathBuf,
    pub files_copied: usize,
    pub bytes_copied: u64,
}

/// How a run ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunReport),
    /// No regular files were found; nothing was created or written
    NoFiles,
}

/// Copies files under blinded names and writes the rename log
///
/// The random source is supplied by the caller so runs can be reproduced with
/// a seeded generator.
pub struct BlindingEngine<R> {
    config: BlindConfig,
    rng: R,
    fs: Arc<dyn FileOps>,
    log_writer: Arc<dyn LogWriter>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<R: Rng> BlindingEngine<R> {
    pub fn new(config: BlindConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            fs: Arc::new(LocalFs),
            log_writer: Arc::new(XlsxLogWriter),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_file_ops(mut self, fs: Arc<dyn FileOps>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_log_writer(mut self, log_writer: Arc<dyn LogWriter>) -> Self {
        self.log_writer = log_writer;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &BlindConfig {
        &self.config
    }

    /// Run the whole pipeline on the current thread
    ///
    /// Any failure is recorded in the diagnostic sink and returned.
    pub fn run(&mut self, request: RunRequest) -> BlindResult<RunOutcome> {
        let result = self.execute(request);
        if let Err(err) = &result {
            self.sink.record(&DiagnosticEvent::RunFailed {
                message: err.to_string(),
            });
        }
        result
    }

    fn execute(&mut self, request: RunRequest) -> BlindResult<RunOutcome> {
        self.config.validate()?;
        if request.folders.is_empty() {
            return Err(BlindError::configuration(
                "folders",
                "at least one source folder is required",
                None,
            ));
        }

        let destination = request.destination;
        if self.config.destination_policy == DestinationPolicy::RequireNew && self.fs.exists(&destination) {
            return Err(BlindError::DestinationExists { path: destination });
        }

        let (folders, repeats) = dedup_folders(&request.folders);
        self.ensure_destination_outside_sources(&destination, &folders)?;

        let run_date = self.config.run_date.unwrap_or_else(|| Local::now().date_naive());
        let template = NameTemplate::new(run_date, self.config.label.as_str());

        self.sink.record(&DiagnosticEvent::RunStarted {
            folders: folders.clone(),
            destination: destination.clone(),
            policy: self.config.naming.name(),
            date_stamp: template.date_stamp().to_string(),
        });
        for folder in repeats {
            self.sink.record(&DiagnosticEvent::DuplicateFolderSkipped { folder });
        }

        let files = collect_source_files(self.fs.as_ref(), &folders)?;
        if files.is_empty() {
            self.sink.record(&DiagnosticEvent::NoFilesFound);
            return Ok(RunOutcome::NoFiles);
        }
        let total = files.len();
        self.sink.record(&DiagnosticEvent::FilesCollected { total });

        let plan = plan_assignments(files, self.config.naming, self.config.sort_mode, &mut self.rng);
        self.prepare_destination(&destination)?;

        let mut records = Vec::with_capacity(total);
        let mut bytes_copied = 0u64;

        for (i, assignment) in plan.into_iter().enumerate() {
            let new_name = template.render(assignment.index, &assignment.file.extension());
            let target = destination.join(&new_name);

            bytes_copied += self
                .fs
                .copy_file(&assignment.file.original_path, &target)
                .map_err(|source| BlindError::CopyFailure {
                    source_path: assignment.file.original_path.clone(),
                    destination: target.clone(),
                    position: i + 1,
                    total,
                    copied: records.len(),
                    source,
                })?;

            self.sink.record(&DiagnosticEvent::FileCopied {
                position: i + 1,
                total,
                old_name: assignment.file.original_name.clone(),
                new_name: new_name.clone(),
            });
            records.push(RenameRecord {
                old_name: assignment.file.original_name,
                new_name,
            });
        }

        let log = RenameLog::from_records(&records);
        drop(records);

        let log_path = destination.join(&self.config.log_file_name);
        self.log_writer
            .write(&log_path, &log)
            .map_err(|source| BlindError::LogWrite {
                path: log_path.clone(),
                copied: log.len(),
                source,
            })?;
        self.sink.record(&DiagnosticEvent::LogWritten {
            path: log_path.clone(),
            records: log.len(),
        });

        Ok(RunOutcome::Completed(RunReport {
            destination,
            log_path,
            files_copied: log.len(),
            bytes_copied,
        }))
    }
}

impl<R> BlindingEngine<R> {
    /// Refuse a destination that resolves to one of the source folders
    ///
    /// Copies would land next to the files still waiting to be read and could
    /// overwrite them. Missing paths cannot collide; missing sources are
    /// reported later by the collector.
    fn ensure_destination_outside_sources(&self, destination: &Path, folders: &[PathBuf]) -> BlindResult<()> {
        if !self.fs.exists(destination) {
            return Ok(());
        }
        let resolved = self
            .fs
            .canonicalize(destination)
            .map_err(|source| BlindError::CreateDestination {
                path: destination.to_path_buf(),
                source,
            })?;

        for folder in folders {
            if self.fs.canonicalize(folder).is_ok_and(|f| f == resolved) {
                return Err(BlindError::configuration(
                    "destination",
                    "destination must not be one of the source folders",
                    Some(destination.display().to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Create the destination according to the configured policy
    ///
    /// Under [`DestinationPolicy::RequireNew`] creating the folder is itself the
    /// existence check, so a folder that appeared after validation is refused.
    fn prepare_destination(&self, destination: &Path) -> BlindResult<()> {
        let create_error = |source: io::Error| BlindError::CreateDestination {
            path: destination.to_path_buf(),
            source,
        };

        match self.config.destination_policy {
            DestinationPolicy::AllowExisting => self.fs.create_dir_all(destination).map_err(create_error),
            DestinationPolicy::RequireNew => {
                if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
                    self.fs.create_dir_all(parent).map_err(create_error)?;
                }
                match self.fs.create_dir(destination) {
                    Ok(()) => Ok(()),
                    Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Err(BlindError::DestinationExists {
                        path: destination.to_path_buf(),
                    }),
                    Err(source) => Err(create_error(source)),
                }
            }
        }
    }
}

impl<R: Rng + Send + 'static> BlindingEngine<R> {
    /// Run the engine on tokio's blocking pool
    ///
    /// Must be called from within a tokio runtime. The returned handle resolves
    /// once the run has finished, failed, or found nothing to do.
    pub fn spawn(mut self, request: RunRequest) -> JoinHandle<BlindResult<RunOutcome>> {
        tokio::task::spawn_blocking(move || self.run(request))
    }
}
