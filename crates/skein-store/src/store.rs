// SPDX-License-Identifier: PMPL-1.0-or-later
//
// SkeinDB store - PatternStore
//
// The single owner of the in-memory pattern mapping and its on-disk JSON
// mirror. All reads and writes go through the mapping; every mutation
// persists immediately unless autosave is disabled. Backups are whole-file
// snapshots delegated to skein-backup; the remote side of backups is an
// injected skein-remote ObjectStore.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use skein_backup::{create_backup, latest_backup};
use skein_remote::ObjectStore;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Outcome of a [`PatternStore::restore`] call.
///
/// "Nothing to restore" is a normal, representable outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The store was restored from the backup at this path.
    Restored(PathBuf),

    /// No explicit backup was given and the backup directory contains no
    /// backups of this storage file. The store was left untouched.
    NoBackups,
}

/// A key-value store for knitting patterns, mirrored to a JSON file.
///
/// Keys are pattern names; values are arbitrary JSON structures (yarn
/// type, stitch counts, whatever the pattern needs). The store is
/// single-process and synchronous: there is no locking and every save is
/// a whole-file overwrite.
///
/// # Example
///
/// ```no_run
/// use skein_store::{PatternStore, StoreConfig};
/// use serde_json::json;
///
/// let mut store = PatternStore::open(StoreConfig::new("knitting_db.json"));
/// store.set("cozy_sweater", json!({"yarn": "wool", "stitches": 200}));
/// assert_eq!(store.get("cozy_sweater").unwrap()["yarn"], "wool");
/// ```
pub struct PatternStore {
    /// Store configuration (paths, autosave policy).
    config: StoreConfig,

    /// The in-memory mapping. BTreeMap keeps the storage file output
    /// deterministic; key order carries no meaning.
    patterns: BTreeMap<String, Value>,

    /// Optional upload target for `backup_to_remote`.
    remote: Option<Box<dyn ObjectStore>>,
}

impl PatternStore {
    /// Open a store against the configured storage file.
    ///
    /// Never fails: a missing storage file means an empty store, and an
    /// unreadable or malformed one is logged and recovered by starting
    /// empty. The file itself is left untouched in every case.
    pub fn open(config: StoreConfig) -> Self {
        let mut store = Self {
            config,
            patterns: BTreeMap::new(),
            remote: None,
        };
        store.load();
        store
    }

    /// Attach a remote object store used by [`Self::backup_to_remote`].
    pub fn with_remote(mut self, remote: Box<dyn ObjectStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Insert or overwrite the pattern under `key`, persisting according
    /// to the configured autosave policy.
    ///
    /// An existing key is silently overwritten.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.set_with(key, value, None);
    }

    /// Like [`Self::set`], with a per-call autosave override.
    ///
    /// `Some(false)` skips persistence for this call even when the store
    /// default is autosave-on, and vice versa.
    pub fn set_with(
        &mut self,
        key: impl Into<String>,
        value: Value,
        autosave_override: Option<bool>,
    ) {
        let key = key.into();
        self.patterns.insert(key.clone(), value);
        debug!(key = %key, "Set pattern");

        if autosave_override.unwrap_or(self.config.autosave) {
            self.persist_after("set");
        }
    }

    /// Return the pattern stored under `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.patterns.get(key)
    }

    /// Remove the pattern under `key`, persisting according to the
    /// configured autosave policy.
    ///
    /// Returns `true` if the key existed and was removed, `false` if it
    /// was not present (in which case the storage file is untouched).
    pub fn delete(&mut self, key: &str) -> bool {
        self.delete_with(key, None)
    }

    /// Like [`Self::delete`], with a per-call autosave override.
    pub fn delete_with(&mut self, key: &str, autosave_override: Option<bool>) -> bool {
        if self.patterns.remove(key).is_none() {
            debug!(key = %key, "Delete skipped, pattern not found");
            return false;
        }

        debug!(key = %key, "Deleted pattern");
        if autosave_override.unwrap_or(self.config.autosave) {
            self.persist_after("delete");
        }
        true
    }

    /// Serialize the entire mapping and overwrite the storage file.
    ///
    /// This is a whole-file, non-atomic overwrite: a crash mid-write can
    /// corrupt the file, which the next `open` detects as a parse failure
    /// and recovers from by starting empty.
    pub fn save(&self) -> StoreResult<()> {
        let contents = serde_json::to_string_pretty(&self.patterns)?;
        fs::write(&self.config.storage_path, contents)?;

        debug!(
            path = %self.config.storage_path.display(),
            patterns = self.patterns.len(),
            "Saved storage file"
        );
        Ok(())
    }

    /// Snapshot the storage file into the configured backup directory.
    ///
    /// Returns the path of the new backup file. Fails if the storage file
    /// does not exist yet or the copy fails; no backup is produced in
    /// that case.
    pub fn backup(&self) -> StoreResult<PathBuf> {
        let path = create_backup(&self.config.storage_path, &self.config.backup_dir)?;
        Ok(path)
    }

    /// Overwrite the storage file from a backup and reload the mapping.
    ///
    /// With an explicit `backup_path` that file is used; otherwise the
    /// most recent backup in the configured directory is selected by the
    /// timestamp embedded in its file name. When nothing is available to
    /// restore, the store (and the storage file) is left exactly as it
    /// was and `NoBackups` is returned.
    pub fn restore(&mut self, backup_path: Option<&Path>) -> StoreResult<RestoreOutcome> {
        let source = match backup_path {
            Some(path) => path.to_path_buf(),
            None => {
                match latest_backup(&self.config.backup_dir, &self.config.storage_path)? {
                    Some(backup) => backup.path,
                    None => {
                        info!(
                            dir = %self.config.backup_dir.display(),
                            "No backups found, store left unchanged"
                        );
                        return Ok(RestoreOutcome::NoBackups);
                    }
                }
            }
        };

        fs::copy(&source, &self.config.storage_path)?;
        self.load();

        info!(
            backup = %source.display(),
            patterns = self.patterns.len(),
            "Restored storage file from backup"
        );
        Ok(RestoreOutcome::Restored(source))
    }

    /// Take a local backup, then upload its bytes to the attached remote
    /// object store under the backup file's base name.
    ///
    /// A failed local backup aborts before any upload is attempted, so a
    /// failure never leaves partial remote state. There is no retry.
    /// Returns the local backup path on success.
    pub fn backup_to_remote(&self) -> StoreResult<PathBuf> {
        let remote = self
            .remote
            .as_deref()
            .ok_or(StoreError::RemoteNotConfigured)?;

        let backup = self.backup()?;
        let bytes = fs::read(&backup)?;
        let object_name = backup
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        remote.upload(&object_name, &bytes)?;

        info!(
            object = %object_name,
            remote = remote.name(),
            bytes = bytes.len(),
            "Uploaded backup to remote object store"
        );
        Ok(backup)
    }

    /// Return the number of patterns currently stored.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Return true if the store contains no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate over all pattern names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// The path of the storage file this store mirrors.
    pub fn storage_path(&self) -> &Path {
        &self.config.storage_path
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Replace the in-memory mapping wholesale from the storage file.
    ///
    /// Recovery is all-or-nothing: any read or parse problem resets the
    /// mapping to empty without touching the file on disk.
    fn load(&mut self) {
        let path = &self.config.storage_path;

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Storage file absent, starting empty");
                self.patterns = BTreeMap::new();
                return;
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Cannot read storage file, starting empty"
                );
                self.patterns = BTreeMap::new();
                return;
            }
        };

        match serde_json::from_str::<BTreeMap<String, Value>>(&contents) {
            Ok(patterns) => {
                debug!(
                    path = %path.display(),
                    patterns = patterns.len(),
                    "Loaded storage file"
                );
                self.patterns = patterns;
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Storage file is not a valid JSON mapping, starting empty"
                );
                self.patterns = BTreeMap::new();
            }
        }
    }

    /// Best-effort persistence after a mutation: a failed save is logged
    /// and the in-memory state keeps the mutation.
    fn persist_after(&self, operation: &str) {
        if let Err(err) = self.save() {
            warn!(
                path = %self.config.storage_path.display(),
                operation,
                error = %err,
                "Autosave failed, in-memory state retained"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> StoreConfig {
        StoreConfig::new(dir.path().join("knitting_db.json"))
    }

    #[test]
    fn test_set_get_delete() {
        let dir = TempDir::new().unwrap();
        let mut store = PatternStore::open(test_config(&dir));

        assert!(store.is_empty());
        assert_eq!(store.get("cozy_sweater"), None);

        store.set("cozy_sweater", json!({"yarn": "wool", "stitches": 200}));
        assert_eq!(
            store.get("cozy_sweater"),
            Some(&json!({"yarn": "wool", "stitches": 200}))
        );
        assert_eq!(store.len(), 1);

        // Silent overwrite.
        store.set("cozy_sweater", json!({"yarn": "alpaca", "stitches": 180}));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("cozy_sweater").unwrap()["yarn"], "alpaca");

        // Delete existing, then absent.
        assert!(store.delete("cozy_sweater"));
        assert_eq!(store.get("cozy_sweater"), None);
        assert!(!store.delete("cozy_sweater"));
    }

    #[test]
    fn test_delete_absent_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let mut store = PatternStore::open(test_config(&dir));
        store.set("hat", json!({"yarn": "cotton"}));

        let before = fs::read(store.storage_path()).unwrap();
        assert!(!store.delete("nonexistent"));
        let after = fs::read(store.storage_path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_durability_across_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let mut store = PatternStore::open(test_config(&dir));
            store.set("cozy_sweater", json!({"yarn": "wool", "stitches": 200}));
        }

        // Simulate a restart: a fresh instance against the same file.
        let store = PatternStore::open(test_config(&dir));
        assert_eq!(
            store.get("cozy_sweater"),
            Some(&json!({"yarn": "wool", "stitches": 200}))
        );
    }

    #[test]
    fn test_autosave_disabled_keeps_disk_stale() {
        let dir = TempDir::new().unwrap();
        let mut store = PatternStore::open(test_config(&dir).with_autosave(false));

        store.set("mittens", json!({"yarn": "merino"}));

        // Nothing on disk until an explicit save.
        assert!(!store.storage_path().exists());
        store.save().unwrap();
        assert!(store.storage_path().exists());

        let reopened = PatternStore::open(test_config(&dir));
        assert_eq!(reopened.get("mittens"), Some(&json!({"yarn": "merino"})));
    }

    #[test]
    fn test_per_call_autosave_override() {
        let dir = TempDir::new().unwrap();
        let mut store = PatternStore::open(test_config(&dir));

        // Instance default is on; this call opts out.
        store.set_with("draft", json!(1), Some(false));
        assert!(!store.storage_path().exists());

        // And this one opts back in, flushing everything.
        store.set_with("scarf", json!(2), Some(true));
        let reopened = PatternStore::open(test_config(&dir));
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn test_corrupt_storage_file_resets_to_empty_without_altering_file() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(&config.storage_path, b"{ not valid json").unwrap();

        let store = PatternStore::open(config.clone());
        assert!(store.is_empty());

        // The unreadable file is preserved byte-for-byte.
        let contents = fs::read(&config.storage_path).unwrap();
        assert_eq!(contents, b"{ not valid json");
    }

    #[test]
    fn test_non_object_storage_file_resets_to_empty() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(&config.storage_path, b"[1, 2, 3]").unwrap();

        let store = PatternStore::open(config);
        assert!(store.is_empty());
    }

    #[test]
    fn test_backup_requires_storage_file() {
        let dir = TempDir::new().unwrap();
        let store = PatternStore::open(test_config(&dir));

        // No save has happened, so there is nothing to back up.
        assert!(store.backup().is_err());
    }

    #[test]
    fn test_restore_with_no_backups() {
        let dir = TempDir::new().unwrap();
        let mut store = PatternStore::open(test_config(&dir));
        store.set("hat", json!({"yarn": "cotton"}));

        let outcome = store.restore(None).unwrap();
        assert_eq!(outcome, RestoreOutcome::NoBackups);
        // Current data untouched.
        assert_eq!(store.get("hat"), Some(&json!({"yarn": "cotton"})));
    }

    #[test]
    fn test_backup_then_restore_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = PatternStore::open(test_config(&dir));

        store.set("cozy_sweater", json!({"yarn": "wool", "stitches": 200}));
        let backup = store.backup().unwrap();

        // Intervening mutations that the restore must undo.
        store.set("cozy_sweater", json!({"yarn": "acrylic"}));
        store.set("socks", json!({"yarn": "bamboo"}));
        store.delete("cozy_sweater");

        let outcome = store.restore(None).unwrap();
        assert_eq!(outcome, RestoreOutcome::Restored(backup));
        assert_eq!(
            store.get("cozy_sweater"),
            Some(&json!({"yarn": "wool", "stitches": 200}))
        );
        assert_eq!(store.get("socks"), None);
    }

    #[test]
    fn test_restore_explicit_path() {
        let dir = TempDir::new().unwrap();
        let mut store = PatternStore::open(test_config(&dir));

        store.set("v1", json!(1));
        let first = store.backup().unwrap();

        store.set("v2", json!(2));

        let outcome = store.restore(Some(&first)).unwrap();
        assert_eq!(outcome, RestoreOutcome::Restored(first));
        assert_eq!(store.get("v1"), Some(&json!(1)));
        assert_eq!(store.get("v2"), None);
    }

    #[test]
    fn test_backup_to_remote_without_remote() {
        let dir = TempDir::new().unwrap();
        let store = PatternStore::open(test_config(&dir));
        assert!(matches!(
            store.backup_to_remote(),
            Err(StoreError::RemoteNotConfigured)
        ));
    }
}
