//! Fixture generator for trying out blinding runs
//!
//! Creates `folder1..folderN` under a base directory, each holding a set of
//! small files named like real acquisition output.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

const SAMPLE_CONTENT: &[u8] = b"Sample content";

#[derive(Parser)]
#[command(name = "blindfold-fixtures")]
#[command(about = "Generate source folders of sample files for blinding runs", long_about = None)]
struct Cli {
    /// Base directory to create the folders in
    #[arg(default_value = ".")]
    base_dir: PathBuf,

    /// Number of folders to create
    #[arg(short, long, default_value_t = 5)]
    folders: usize,

    /// Number of files per folder
    #[arg(short = 'n', long, default_value_t = 10)]
    files_per_folder: usize,

    /// File extension to use (without the dot)
    #[arg(short, long, default_value = "png")]
    extension: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let created = create_fixture_folders(&cli.base_dir, cli.folders, cli.files_per_folder, &cli.extension)?;
    println!(
        "Created {} folder(s) with {} file(s) each under {}",
        created.len(),
        cli.files_per_folder,
        cli.base_dir.display()
    );
    for folder in created {
        println!("  {}", folder.display());
    }

    Ok(())
}

fn fixture_file_name(folder: usize, file: usize, extension: &str) -> String {
    format!("240317_814×{}_pyd_31_#31_{}.{}", folder + 29, file, extension)
}

fn create_fixture_folders(
    base_dir: &Path,
    num_folders: usize,
    files_per_folder: usize,
    extension: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(base_dir)
        .with_context(|| format!("Failed to create base directory {}", base_dir.display()))?;

    let mut created = Vec::with_capacity(num_folders);
    for i in 1..=num_folders {
        let folder = base_dir.join(format!("folder{i}"));
        fs::create_dir_all(&folder).with_context(|| format!("Failed to create {}", folder.display()))?;

        for j in 1..=files_per_folder {
            let path = folder.join(fixture_file_name(i, j, extension));
            fs::write(&path, SAMPLE_CONTENT).with_context(|| format!("Failed to write {}", path.display()))?;
        }
        created.push(folder);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fixture_names_follow_pattern() {
        assert_eq!(fixture_file_name(1, 7, "png"), "240317_814×30_pyd_31_#31_7.png");
    }

    #[test]
    fn test_create_fixture_folders() {
        let temp_dir = TempDir::new().unwrap();
        let created = create_fixture_folders(temp_dir.path(), 2, 3, "tif").unwrap();

        assert_eq!(created.len(), 2);
        for folder in &created {
            assert_eq!(fs::read_dir(folder).unwrap().count(), 3);
        }
        let content = fs::read(created[1].join("240317_814×31_pyd_31_#31_3.tif")).unwrap();
        assert_eq!(content, SAMPLE_CONTENT);
    }
}
