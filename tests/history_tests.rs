// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use codegen::history::{HistoryEntry, HistoryStore, HISTORY_STORAGE_KEY, MAX_HISTORY_ITEMS};
use codegen::storage::{MemoryStorage, SessionStorage};
use proptest::prelude::*;
use serde_json::{json, Map};

/// Operations a user can trigger from the history panel
#[derive(Debug, Clone)]
enum Op {
    Add(String),
    RemoveExisting(usize),
    RemoveMissing,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => "[a-z ]{0,12}".prop_map(Op::Add),
        2 => (0usize..MAX_HISTORY_ITEMS).prop_map(Op::RemoveExisting),
        1 => Just(Op::RemoveMissing),
        1 => Just(Op::Clear),
    ]
}

fn assert_newest_first(entries: &[HistoryEntry]) {
    for pair in entries.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
        assert!(pair[0].id > pair[1].id);
    }
}

proptest! {
    #[test]
    fn prop_add_grows_until_capacity(count in 0usize..30) {
        let mut store = HistoryStore::open(MemoryStorage::new());
        for i in 0..count {
            let before = store.len();
            store.add(format!("task {}", i), "", "Python", Map::new());
            prop_assert_eq!(store.len(), (before + 1).min(MAX_HISTORY_ITEMS));
        }
        assert_newest_first(store.entries());
    }

    #[test]
    fn prop_memory_and_storage_stay_consistent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut store = HistoryStore::open(MemoryStorage::new());
        for op in ops {
            match op {
                Op::Add(requirement) => {
                    let id = store.add(requirement, "", "Rust", Map::new());
                    prop_assert_eq!(store.entries()[0].id, id);
                }
                Op::RemoveExisting(index) => {
                    if let Some(id) = store.entries().get(index).map(|e| e.id) {
                        let before = store.len();
                        prop_assert!(store.remove(id));
                        prop_assert_eq!(store.len(), before - 1);
                        prop_assert!(store.find(id).is_none());
                    }
                }
                Op::RemoveMissing => {
                    let before = store.entries().to_vec();
                    prop_assert!(!store.remove(0));
                    prop_assert_eq!(store.entries(), before.as_slice());
                }
                Op::Clear => store.clear(),
            }

            prop_assert!(store.len() <= MAX_HISTORY_ITEMS);
            prop_assert_eq!(store.load(), store.entries().to_vec());
            assert_newest_first(store.entries());

            let mut ids: Vec<_> = store.entries().iter().map(|e| e.id).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), store.len());
        }
    }
}

#[test]
fn test_scenario_single_add() {
    let mut store = HistoryStore::open(MemoryStorage::new());
    store.add("Write a sort function", "", "Python", Map::new());

    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].language, "Python");
    assert_eq!(store.entries()[0].code, "");
}

#[test]
fn test_scenario_eleventh_add_drops_oldest() {
    let mut store = HistoryStore::open(MemoryStorage::new());
    for i in 0..10 {
        store.add(format!("task {}", i), "", "Python", Map::new());
    }
    let oldest = store.entries()[9].id;

    store.add("task 10", "", "Python", Map::new());

    assert_eq!(store.len(), 10);
    assert!(store.find(oldest).is_none());
    assert_eq!(store.entries()[9].requirement, "task 1");
}

#[test]
fn test_scenario_save_empty_then_load() {
    let mut store = HistoryStore::open(MemoryStorage::new());
    store.save(vec![]);
    assert!(store.load().is_empty());
}

#[test]
fn test_scenario_corrupt_storage() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(HISTORY_STORAGE_KEY, "<html>definitely not json")
        .unwrap();

    let store = HistoryStore::open(storage);
    assert!(store.load().is_empty());
    assert!(store.is_empty());
}

#[test]
fn test_scenario_remove_then_find() {
    let mut store = HistoryStore::open(MemoryStorage::new());
    let id = store.add("a", "b", "Go", Map::new());

    assert!(store.remove(id));
    assert!(store.find(id).is_none());
}

#[test]
fn test_scenario_clear_empty_store() {
    let mut store = HistoryStore::open(MemoryStorage::new());
    store.clear();
    assert!(store.load().is_empty());
}

#[test]
fn test_hydrates_browser_written_history() {
    let raw = json!([
        {
            "id": 1741944500000u64,
            "timestamp": "2025-03-14T09:28:20.000Z",
            "requirement": "Observer in TypeScript",
            "code": "",
            "language": "typescript",
            "template": "Observer",
            "category": "behavioral",
            "framework": "react"
        },
        {
            "id": 1741944413123u64,
            "timestamp": "2025-03-14T09:26:53.123Z",
            "requirement": "Write a sort function",
            "code": "def sort(xs): return sorted(xs)",
            "language": "python"
        }
    ]);
    let mut storage = MemoryStorage::new();
    storage
        .set_item(HISTORY_STORAGE_KEY, &raw.to_string())
        .unwrap();

    let mut store = HistoryStore::open(storage);
    assert_eq!(store.len(), 2);
    assert_eq!(store.entries()[0].framework(), Some("react"));

    let id = store.add("next", "", "go", Map::new());
    assert!(id > 1741944500000);
    assert_eq!(store.entries()[1].template(), Some("Observer"));
}
