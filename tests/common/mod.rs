//! Shared helpers for the integration tests

#![allow(dead_code)]

use calamine::{open_workbook, Reader, Xlsx};
use sample_blindfold::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Keeps a copy of every log it is asked to write, then writes the real file
#[derive(Default)]
pub struct CapturingLogWriter {
    logs: Mutex<Vec<(PathBuf, RenameLog)>>,
}

impl CapturingLogWriter {
    pub fn logs(&self) -> Vec<(PathBuf, RenameLog)> {
        self.logs.lock().unwrap().clone()
    }
}

impl LogWriter for CapturingLogWriter {
    fn write(&self, path: &Path, log: &RenameLog) -> Result<(), LogWriteError> {
        self.logs.lock().unwrap().push((path.to_path_buf(), log.clone()));
        XlsxLogWriter.write(path, log)
    }
}

/// Write each named file into `dir` with its own name as content
pub fn populate(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), name.as_bytes()).unwrap();
    }
}

/// Names of the regular files in `dir`
pub fn file_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().unwrap().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect()
}

/// Index embedded in a blinded name such as `240317_sample_12.png`
pub fn index_of(new_name: &str) -> usize {
    let stem = new_name.split('.').next().unwrap();
    stem.rsplit('_').next().unwrap().parse().unwrap()
}

pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
}

/// Sheet names of a written workbook and the text of every row in each sheet
pub fn read_workbook(path: &Path) -> Vec<(String, Vec<Vec<String>>)> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook
        .sheet_names()
        .into_iter()
        .map(|name| {
            let range = workbook.worksheet_range(&name).unwrap();
            let rows = range
                .rows()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect();
            (name, rows)
        })
        .collect()
}
