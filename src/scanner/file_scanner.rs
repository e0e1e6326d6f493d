//! Source file collection

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::fs_ops::{EntryKind, FileOps};
use crate::error::{BlindError, BlindResult};

/// One input file picked up from a source folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub original_path: PathBuf,
    pub original_name: String,
}

impl SourceFile {
    /// `None` when the path has no final component or its name is not UTF-8
    ///
    /// Names are written verbatim to the rename log, so a name that cannot be
    /// represented exactly is never accepted.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let original_name = path.file_name()?.to_str()?.to_owned();
        Some(Self {
            original_path: path,
            original_name,
        })
    }

    /// Extension of the original name including the leading dot, or `""`
    ///
    /// Only the last suffix counts (`a.tar.gz` gives `.gz`) and dot-files such
    /// as `.hidden` have no extension.
    pub fn extension(&self) -> String {
        Path::new(&self.original_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }
}

/// Drop repeated folders, keeping the first occurrence of each
///
/// Returns the unique folders in input order and the repeats that were dropped.
pub fn dedup_folders(folders: &[PathBuf]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(folders.len());
    let mut repeats = Vec::new();

    for folder in folders {
        if seen.insert(folder.clone()) {
            unique.push(folder.clone());
        } else {
            repeats.push(folder.clone());
        }
    }

    (unique, repeats)
}

/// Collect the regular files directly inside each folder
///
/// # Arguments
/// * `fs` - Filesystem used for listing
/// * `folders` - Source folders, visited in the given order
///
/// # Returns
/// One flat list of files; subdirectories and other entries are skipped and
/// nothing is visited recursively. An empty list is not an error. A file whose
/// name is not valid UTF-8 fails the run with [`BlindError::UnsupportedName`].
pub fn collect_source_files(fs: &dyn FileOps, folders: &[PathBuf]) -> BlindResult<Vec<SourceFile>> {
    let mut files = Vec::new();

    for folder in folders {
        let entries = fs.list_dir(folder).map_err(|source| BlindError::Listing {
            path: folder.clone(),
            source,
        })?;

        for entry in entries.into_iter().filter(|entry| entry.kind == EntryKind::File) {
            let file = SourceFile::from_path(entry.path.clone())
                .ok_or(BlindError::UnsupportedName { path: entry.path })?;
            files.push(file);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fs_ops::LocalFs;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_collect_skips_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        File::create(temp_dir.path().join("a1.png")).unwrap();
        File::create(subdir.join("a2.png")).unwrap();

        let files = collect_source_files(&LocalFs, &[temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].original_name, "a1.png");
        assert_eq!(files[0].original_path, temp_dir.path().join("a1.png"));
    }

    #[test]
    fn test_collect_concatenates_in_folder_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        File::create(first.path().join("x.png")).unwrap();
        File::create(second.path().join("y.png")).unwrap();
        File::create(second.path().join("z.png")).unwrap();

        let folders = vec![second.path().to_path_buf(), first.path().to_path_buf()];
        let files = collect_source_files(&LocalFs, &folders).unwrap();

        assert_eq!(files.len(), 3);
        assert_eq!(files[2].original_name, "x.png");
    }

    #[test]
    fn test_collect_empty_folder() {
        let temp_dir = TempDir::new().unwrap();
        let files = collect_source_files(&LocalFs, &[temp_dir.path().to_path_buf()]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_missing_folder_names_it() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let err = collect_source_files(&LocalFs, &[missing.clone()]).unwrap_err();
        match err {
            BlindError::Listing { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extension_rules() {
        let ext = |name: &str| SourceFile::from_path(PathBuf::from("/in").join(name)).unwrap().extension();
        assert_eq!(ext("a1.png"), ".png");
        assert_eq!(ext("archive.tar.gz"), ".gz");
        assert_eq!(ext("README"), "");
        assert_eq!(ext(".hidden"), "");
    }

    #[test]
    fn test_dedup_folders_keeps_first() {
        let folders = vec![PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/a")];
        let (unique, repeats) = dedup_folders(&folders);
        assert_eq!(unique, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(repeats, vec![PathBuf::from("/a")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_rejects_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let bad = temp_dir.path().join(OsStr::from_bytes(b"bad\xff.png"));
        // Some filesystems refuse such names outright
        if File::create(&bad).is_err() {
            return;
        }
        File::create(temp_dir.path().join("good.png")).unwrap();

        let err = collect_source_files(&LocalFs, &[temp_dir.path().to_path_buf()]).unwrap_err();
        match err {
            BlindError::UnsupportedName { path } => assert_eq!(path, bad),
            other => panic!("unexpected error: {other}"),
        }
        assert!(SourceFile::from_path(bad).is_none());
    }
}
