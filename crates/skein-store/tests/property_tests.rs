// SPDX-License-Identifier: PMPL-1.0-or-later
//! Property-based tests for the pattern store
//!
//! Arbitrary pattern mappings must survive save/load round trips, and
//! deletion must never disturb unrelated entries.

use proptest::prelude::*;
use serde_json::{json, Value};
use skein_store::{PatternStore, StoreConfig};
use std::collections::HashMap;
use tempfile::TempDir;

/// Generate arbitrary pattern names
fn arb_key() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}"
}

/// Generate arbitrary JSON pattern values: scalars, and one level of
/// nesting like real pattern records ({"yarn": ..., "stitches": ...}).
fn arb_pattern() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[A-Za-z0-9 ]{0,20}".prop_map(Value::from),
    ];
    prop_oneof![
        leaf.clone(),
        prop::collection::vec(leaf.clone(), 0..4).prop_map(Value::from),
        prop::collection::hash_map("[a-z]{1,8}", leaf, 0..4)
            .prop_map(|entries| json!(entries)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_mapping_survives_reopen(
        entries in prop::collection::hash_map(arb_key(), arb_pattern(), 0..8)
    ) {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path().join("patterns.json"));

        let mut store = PatternStore::open(config.clone());
        for (key, value) in &entries {
            store.set(key.clone(), value.clone());
        }
        drop(store);

        let reopened = PatternStore::open(config);
        prop_assert_eq!(reopened.len(), entries.len());
        for (key, value) in &entries {
            prop_assert_eq!(reopened.get(key), Some(value));
        }
    }

    #[test]
    fn test_delete_leaves_other_entries_untouched(
        entries in prop::collection::hash_map(arb_key(), arb_pattern(), 1..8),
        victim_index in 0usize..8
    ) {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path().join("patterns.json"));

        let mut store = PatternStore::open(config.clone());
        for (key, value) in &entries {
            store.set(key.clone(), value.clone());
        }

        let keys: Vec<&String> = entries.keys().collect();
        let victim = keys[victim_index % keys.len()].clone();
        prop_assert!(store.delete(&victim));
        prop_assert!(!store.delete(&victim));

        let reopened = PatternStore::open(config);
        prop_assert_eq!(reopened.get(&victim), None);

        let survivors: HashMap<&String, &Value> = entries
            .iter()
            .filter(|(key, _)| **key != victim)
            .collect();
        prop_assert_eq!(reopened.len(), survivors.len());
        for (key, value) in survivors {
            prop_assert_eq!(reopened.get(key), Some(value));
        }
    }

    #[test]
    fn test_explicit_save_round_trips_without_autosave(
        key in arb_key(),
        value in arb_pattern()
    ) {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path().join("patterns.json")).with_autosave(false);

        let mut store = PatternStore::open(config.clone());
        store.set(key.clone(), value.clone());
        store.save().unwrap();

        let reopened = PatternStore::open(config);
        prop_assert_eq!(reopened.get(&key), Some(&value));
    }
}
