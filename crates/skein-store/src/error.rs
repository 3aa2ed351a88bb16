// SPDX-License-Identifier: PMPL-1.0-or-later
//
// SkeinDB store - Error types
//
// Unified error enum for pattern store operations. Load-time problems
// (missing or corrupt storage file) are recovered locally and never
// appear here; these variants cover explicit save, backup, restore, and
// remote upload failures.

use skein_backup::BackupError;
use skein_remote::RemoteError;
use thiserror::Error;

/// Errors that can occur during pattern store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred while reading or writing the storage file.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the in-memory mapping to JSON.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A backup snapshot could not be created or discovered.
    #[error(transparent)]
    Backup(#[from] BackupError),

    /// The remote upload failed after a successful local backup.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A remote operation was requested but no object store is configured.
    #[error("no remote object store configured")]
    RemoteNotConfigured,
}

/// Convenience type alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;
