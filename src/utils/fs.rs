use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const SKIPPED_DIRS: &[&str] = &["node_modules", "dist", "coverage"];

fn is_walkable(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
}

/// Every regular file under `root`, skipping hidden directories and build
/// output. Paths come back in walk order, sorted per directory.
pub fn walk_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_walkable)
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(DirEntry::into_path)
        .collect()
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// Writes `original` next to `path` as `<path>.backup`.
pub fn write_backup(path: &Path, original: &str) -> Result<PathBuf> {
    let backup = backup_path(path);
    std::fs::write(&backup, original)
        .with_context(|| format!("Failed to write backup {}", backup.display()))?;
    Ok(backup)
}
