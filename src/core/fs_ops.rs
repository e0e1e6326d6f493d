//! Filesystem primitives used by the collector and the engine

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Kind of a listed directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// One direct entry of a listed directory
#[derive(Debug, Clone)]
pub struct ListedEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Synchronous filesystem capabilities needed for a run
pub trait FileOps: Send + Sync {
    /// List the direct entries of `dir` in the platform's native order
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<ListedEntry>>;

    /// Copy `from` to `to` byte for byte, returning the number of bytes copied
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Create exactly `dir`; fails with `AlreadyExists` when it is present
    fn create_dir(&self, dir: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Absolute path with links and `..` resolved
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// [`FileOps`] backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileOps for LocalFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<ListedEntry>> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false) {
            let entry = entry.map_err(io::Error::from)?;
            let file_type = entry.file_type();

            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else if entry.path_is_symlink() {
                // Resolve links; broken ones fall through to Other
                match fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_file() => EntryKind::File,
                    Ok(meta) if meta.is_dir() => EntryKind::Directory,
                    _ => EntryKind::Other,
                }
            } else {
                EntryKind::Other
            };

            entries.push(ListedEntry {
                path: entry.into_path(),
                kind,
            });
        }

        Ok(entries)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn create_dir(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir(dir)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_list_dir_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        File::create(temp_dir.path().join("a1.png")).unwrap();
        File::create(subdir.join("nested.png")).unwrap();

        let entries = LocalFs.list_dir(temp_dir.path()).unwrap();
        assert_eq!(entries.len(), 2);

        let files: Vec<_> = entries.iter().filter(|e| e.kind == EntryKind::File).collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, temp_dir.path().join("a1.png"));
        assert!(entries.iter().any(|e| e.kind == EntryKind::Directory && e.path == subdir));
    }

    #[test]
    fn test_list_dir_missing_folder_errors() {
        let temp_dir = TempDir::new().unwrap();
        assert!(LocalFs.list_dir(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_copy_file_preserves_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("in.bin");
        let to = temp_dir.path().join("out.bin");
        let payload: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        File::create(&from).unwrap().write_all(&payload).unwrap();

        let copied = LocalFs.copy_file(&from, &to).unwrap();
        assert_eq!(copied, payload.len() as u64);
        assert_eq!(fs::read(&to).unwrap(), payload);
    }

    #[test]
    fn test_create_dir_refuses_existing() {
        let temp_dir = TempDir::new().unwrap();
        let err = LocalFs.create_dir(temp_dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_canonicalize_resolves_dot_dot() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        let roundabout = subdir.join("..").join("subdir");
        assert_eq!(
            LocalFs.canonicalize(&roundabout).unwrap(),
            LocalFs.canonicalize(&subdir).unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_resolve_to_target_kind() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.png");
        File::create(&target).unwrap();
        std::os::unix::fs::symlink(&target, temp_dir.path().join("link.png")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), temp_dir.path().join("broken")).unwrap();

        let entries = LocalFs.list_dir(temp_dir.path()).unwrap();
        let kind_of = |name: &str| {
            entries
                .iter()
                .find(|e| e.path.file_name().unwrap() == name)
                .map(|e| e.kind)
                .unwrap()
        };
        assert_eq!(kind_of("link.png"), EntryKind::File);
        assert_eq!(kind_of("broken"), EntryKind::Other);
    }
}
