// SPDX-License-Identifier: PMPL-1.0-or-later
//
// SkeinDB store - Configuration
//
// Plain configuration struct for the pattern store. Everything that was
// ambient in older pattern stores (hard-coded paths, global autosave
// toggles) is an explicit, documented field here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::PatternStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON storage file. The file is created on the first
    /// save; a missing file at open time simply means an empty store.
    pub storage_path: PathBuf,

    /// Whether every mutation persists to disk immediately. Individual
    /// calls may override this per operation. When disabled, the caller
    /// is responsible for calling `save()`.
    pub autosave: bool,

    /// Directory where timestamped backup snapshots are written. Created
    /// on the first backup.
    pub backup_dir: PathBuf,
}

impl StoreConfig {
    /// Build a configuration for the given storage file, with autosave on
    /// and backups in a `backups/` directory next to the storage file.
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();
        let backup_dir = storage_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("backups");
        Self {
            storage_path,
            autosave: true,
            backup_dir,
        }
    }

    /// Replace the backup directory.
    pub fn with_backup_dir(mut self, backup_dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = backup_dir.into();
        self
    }

    /// Set the autosave policy.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("patterns.json")
    }
}
