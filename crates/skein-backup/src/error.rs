// SPDX-License-Identifier: PMPL-1.0-or-later
//
// SkeinDB backup - Error types
//
// Defines all error conditions that can arise while creating or discovering
// backup snapshots of the storage file.

use thiserror::Error;

/// Errors that can occur during backup operations.
#[derive(Debug, Error)]
pub enum BackupError {
    /// An I/O error occurred while copying or inspecting a backup file.
    #[error("backup I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage file to be backed up does not exist yet, so there is
    /// nothing to copy.
    #[error("storage file does not exist: {0}")]
    StorageFileMissing(String),

    /// The backup directory does not exist or is not accessible.
    #[error("backup directory not found or inaccessible: {0}")]
    DirectoryNotFound(String),
}

/// Convenience type alias for backup results.
pub type BackupResult<T> = Result<T, BackupError>;
