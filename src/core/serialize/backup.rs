use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

const BACKUP_SUFFIX: &str = ".backup_";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Sibling path for a backup of `path` taken at `at`: `<path>.backup_<timestamp>`.
pub fn backup_path(path: &Path, at: DateTime<Local>) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    name.push(at.format(TIMESTAMP_FORMAT).to_string());
    PathBuf::from(name)
}

/// Copy an existing document next to itself before it is overwritten.
///
/// Returns `None` when there is nothing to back up.
pub fn create_backup(path: &Path) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }

    let target = backup_path(path, Local::now());
    fs::copy(path, &target)
        .with_context(|| format!("Failed to back up {} to {}", path.display(), target.display()))?;
    Ok(Some(target))
}
