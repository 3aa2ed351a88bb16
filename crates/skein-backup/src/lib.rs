// SPDX-License-Identifier: PMPL-1.0-or-later
//
// SkeinDB backup crate
//
// Provides timestamped snapshot files for the SkeinDB storage file. A
// backup is a verbatim, immutable copy of the storage file at a point in
// time, named after the storage file plus a local-time stamp at second
// resolution:
//
// ```text
// backups/
// ├── knitting_db_20260829_221403.json
// ├── knitting_db_20260830_091200.json
// └── knitting_db_20260830_142755.json
// ```
//
// Discovery and "latest backup" selection are driven entirely by the
// timestamp embedded in the file name. Files that do not match the naming
// pattern are ignored, so the backup directory may be shared with other
// artifacts.

pub mod error;
pub mod snapshot;

// Re-export the primary public API for ergonomic imports.
pub use error::{BackupError, BackupResult};
pub use snapshot::{
    backup_filename, backup_path, create_backup, latest_backup, list_backups,
    parse_backup_filename, BackupInfo, TIMESTAMP_FORMAT,
};
