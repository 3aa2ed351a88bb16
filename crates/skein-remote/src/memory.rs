// SPDX-License-Identifier: PMPL-1.0-or-later
//
// In-memory object store for SkeinDB.
//
// Holds uploaded objects in a `HashMap` behind a `Mutex`. Intended for
// tests and ephemeral setups where no real remote is available; uploads
// are lost on drop.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::RemoteResult;
use crate::object_store::ObjectStore;

/// An in-memory object store that records uploads instead of sending them
/// anywhere.
///
/// Cloning shares the underlying object map, so a test can keep a handle
/// and inspect what the code under test uploaded.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    /// Uploaded objects, keyed by object name.
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryObjectStore {
    /// Create a new, empty in-memory object store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.lock().expect("object store lock poisoned").len()
    }

    /// Return true if no objects have been uploaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the bytes uploaded under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("object store lock poisoned")
            .get(name)
            .cloned()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn upload(&self, name: &str, bytes: &[u8]) -> RemoteResult<()> {
        self.objects
            .lock()
            .expect("object store lock poisoned")
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_and_inspect() {
        let store = InMemoryObjectStore::new();
        assert!(store.is_empty());

        store.upload("patterns_20260830_142755.json", b"{}").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("patterns_20260830_142755.json"),
            Some(b"{}".to_vec())
        );
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_upload_overwrites() {
        let store = InMemoryObjectStore::new();
        store.upload("obj", b"first").unwrap();
        store.upload("obj", b"second").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("obj"), Some(b"second".to_vec()));
    }

    #[test]
    fn test_clone_shares_state() {
        let store = InMemoryObjectStore::new();
        let clone = store.clone();

        store.upload("shared", b"data").unwrap();
        assert_eq!(clone.get("shared"), Some(b"data".to_vec()));
    }

    #[test]
    fn test_name() {
        assert_eq!(InMemoryObjectStore::new().name(), "in-memory");
    }
}
