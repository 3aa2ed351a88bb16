// SPDX-License-Identifier: PMPL-1.0-or-later
//
// SkeinDB store crate
//
// A single-process key-value store for knitting patterns, mirrored to a
// JSON file on local disk. Pattern names map to arbitrary JSON values;
// every mutation persists immediately unless autosave is disabled.
// Timestamped whole-file backups come from skein-backup, and the latest
// backup can be pushed to a remote object store through the skein-remote
// `ObjectStore` seam.
//
// # Modules
//
// - [`store`] -- The `PatternStore` itself plus `RestoreOutcome`.
// - [`config`] -- `StoreConfig` (storage path, autosave policy, backup dir).
// - [`error`] -- The `StoreError` enum and `StoreResult` alias.
//
// # Example
//
// ```no_run
// use skein_store::{PatternStore, StoreConfig};
// use serde_json::json;
//
// let mut store = PatternStore::open(StoreConfig::new("knitting_db.json"));
// store.set("cozy_sweater", json!({"yarn": "wool", "stitches": 200}));
//
// let backup = store.backup().unwrap();
// println!("backed up to {}", backup.display());
// ```

pub mod config;
pub mod error;
pub mod store;

// Re-export the primary public API for ergonomic imports.
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::{PatternStore, RestoreOutcome};
