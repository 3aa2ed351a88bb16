// SPDX-License-Identifier: PMPL-1.0-or-later
//
// SkeinDB remote object store crate
//
// The store core treats the remote side of backups as an opaque
// collaborator: "upload these bytes under this name, tell me whether it
// worked". This crate provides that seam.
//
// # Modules
//
// - [`object_store`] -- The `ObjectStore` trait defining the upload interface.
// - [`error`] -- The `RemoteError` enum covering all upload failure modes.
// - [`http`] -- A blocking HTTP implementation (`PUT {endpoint}/{bucket}/{name}`)
//   with bearer-token credentials read from a file.
// - [`memory`] -- An in-memory implementation for tests and ephemeral use.

pub mod error;
pub mod http;
pub mod memory;
pub mod object_store;

// Re-export the most commonly used types at the crate root for convenience.
pub use error::{RemoteError, RemoteResult};
pub use http::{HttpObjectStore, RemoteConfig};
pub use memory::InMemoryObjectStore;
pub use object_store::ObjectStore;
