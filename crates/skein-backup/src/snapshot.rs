// SPDX-License-Identifier: PMPL-1.0-or-later
//
// SkeinDB backup - Snapshot management
//
// Each backup is a single verbatim copy of the storage file, named
// `{stem}_{YYYYMMDD}_{HHMMSS}{.ext}` inside a dedicated backup directory.
// The timestamp embedded in the file name is authoritative for ordering;
// filesystem creation time is never consulted, since it is not a portable
// signal across filesystems.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};
use tracing::{debug, info};

use crate::error::{BackupError, BackupResult};

/// The timestamp format embedded in backup file names: local time at
/// second resolution, e.g. `20260830_142755`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Metadata about a single backup snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    /// The full path to the backup file on disk.
    pub path: PathBuf,

    /// The timestamp parsed from the file name. All ordering of backups
    /// is based on this value.
    pub timestamp: NaiveDateTime,

    /// Current file size in bytes.
    pub file_size: u64,
}

impl PartialOrd for BackupInfo {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BackupInfo {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

/// The storage file's name split into the parts used to build and parse
/// backup file names.
fn split_storage_name(storage_path: &Path) -> (String, Option<String>) {
    let stem = storage_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = storage_path
        .extension()
        .map(|e| e.to_string_lossy().to_string());
    (stem, extension)
}

/// Build the canonical backup file name for the given storage file and
/// timestamp.
///
/// Format: `knitting_db_20260830_142755.json` for a storage file named
/// `knitting_db.json`. The storage file's extension is preserved; a
/// storage file without an extension produces a backup without one.
pub fn backup_filename(storage_path: &Path, timestamp: &DateTime<Local>) -> String {
    let (stem, extension) = split_storage_name(storage_path);
    let stamp = timestamp.format(TIMESTAMP_FORMAT);
    match extension {
        Some(ext) => format!("{stem}_{stamp}.{ext}"),
        None => format!("{stem}_{stamp}"),
    }
}

/// Build the full path for a backup file in the given backup directory.
pub fn backup_path(
    backup_dir: &Path,
    storage_path: &Path,
    timestamp: &DateTime<Local>,
) -> PathBuf {
    backup_dir.join(backup_filename(storage_path, timestamp))
}

/// Parse the embedded timestamp from a backup file name belonging to the
/// given storage file.
///
/// Returns `None` if the name does not match the expected pattern, so
/// unrelated files in the backup directory are skipped during discovery.
pub fn parse_backup_filename(name: &str, storage_path: &Path) -> Option<NaiveDateTime> {
    let (stem, extension) = split_storage_name(storage_path);

    let stripped = name.strip_prefix(&format!("{stem}_"))?;
    let stamp = match extension {
        Some(ext) => stripped.strip_suffix(&format!(".{ext}"))?,
        None => stripped,
    };

    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

/// Scan a backup directory and return metadata for all backups of the
/// given storage file, sorted by embedded timestamp (ascending).
///
/// Files that do not match the backup naming pattern are silently ignored.
pub fn list_backups(backup_dir: &Path, storage_path: &Path) -> BackupResult<Vec<BackupInfo>> {
    if !backup_dir.is_dir() {
        return Err(BackupError::DirectoryNotFound(
            backup_dir.display().to_string(),
        ));
    }

    let mut backups = Vec::new();

    for dir_entry in fs::read_dir(backup_dir)? {
        let dir_entry = dir_entry?;
        let file_name = dir_entry.file_name();
        let name = file_name.to_string_lossy();

        if let Some(timestamp) = parse_backup_filename(&name, storage_path) {
            let metadata = dir_entry.metadata()?;
            backups.push(BackupInfo {
                path: dir_entry.path(),
                timestamp,
                file_size: metadata.len(),
            });
        }
    }

    backups.sort();

    debug!(
        count = backups.len(),
        dir = %backup_dir.display(),
        "Discovered backup snapshots"
    );

    Ok(backups)
}

/// Return the most recent backup of the given storage file, judged by the
/// timestamp embedded in the file name.
///
/// A missing backup directory is treated as "no backups yet" rather than
/// an error, since the directory is only created by the first backup.
pub fn latest_backup(
    backup_dir: &Path,
    storage_path: &Path,
) -> BackupResult<Option<BackupInfo>> {
    if !backup_dir.is_dir() {
        return Ok(None);
    }

    let backups = list_backups(backup_dir, storage_path)?;
    Ok(backups.into_iter().next_back())
}

/// Copy the storage file into the backup directory under a timestamped
/// name, creating the directory if needed.
///
/// The copy is byte-for-byte; `fs::copy` also carries over permissions
/// where the platform supports it. Returns the path of the new backup.
/// A backup taken within the same second as a previous one overwrites it,
/// which is harmless: both are snapshots of the same storage file.
pub fn create_backup(storage_path: &Path, backup_dir: &Path) -> BackupResult<PathBuf> {
    if !storage_path.is_file() {
        return Err(BackupError::StorageFileMissing(
            storage_path.display().to_string(),
        ));
    }

    fs::create_dir_all(backup_dir)?;

    let destination = backup_path(backup_dir, storage_path, &Local::now());
    let bytes_copied = fs::copy(storage_path, &destination)?;

    info!(
        source = %storage_path.display(),
        backup = %destination.display(),
        bytes = bytes_copied,
        "Created backup snapshot"
    );

    Ok(destination)
}
