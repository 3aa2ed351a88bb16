// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Core object store trait for SkeinDB.
//
// Defines the `ObjectStore` trait that all upload targets must satisfy.
// The store core only ever needs "upload these bytes under this name",
// so the trait is deliberately minimal: one upload operation plus a name
// for logging.

use crate::error::RemoteResult;

/// A pluggable remote object store used as an upload target for backups.
///
/// The object name is the backup file's base name; the destination
/// container (bucket, project, folder) is implementation configuration,
/// not part of the call. Implementations perform a single blocking
/// request per upload with no retry.
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` under the given object `name`, overwriting any
    /// existing object with that name.
    fn upload(&self, name: &str, bytes: &[u8]) -> RemoteResult<()>;

    /// A human-readable name for this object store, used in logging.
    fn name(&self) -> &str;
}
