// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! History store implementation
//!
//! Keeps the newest-first generation log in memory and writes it through
//! to session storage as a JSON array on every mutation. Storage failures
//! are logged and swallowed: reads degrade to an empty log, writes leave
//! the in-memory log authoritative until the next successful write.

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::{Map, Value};

use super::entry::{EntryId, HistoryEntry};
use super::render::{HistoryRenderer, NullRenderer};
use crate::storage::SessionStorage;
use crate::templates::TemplateSelection;

/// Session storage key holding the history log
pub const HISTORY_STORAGE_KEY: &str = "codegen_history";

/// Maximum number of retained entries
pub const MAX_HISTORY_ITEMS: usize = 10;

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Form state restored when an entry is reloaded into the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadedForm {
    pub requirement: String,
    pub language: String,
    pub code: String,
    /// Length shown next to the requirement field, in UTF-16 code units
    /// to agree with the browser's counter
    pub char_count: usize,
}

/// Bounded, persisted generation history
pub struct HistoryStore<S: SessionStorage> {
    storage: S,
    /// Newest first, never longer than `MAX_HISTORY_ITEMS`
    entries: Vec<HistoryEntry>,
    renderer: Box<dyn HistoryRenderer>,
    clock: Clock,
}

impl<S: SessionStorage> HistoryStore<S> {
    /// Open the store, hydrating from whatever the storage holds
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            entries: Vec::new(),
            renderer: Box::new(NullRenderer),
            clock: Box::new(Utc::now),
        };
        let mut entries = store.load();
        if entries.len() > MAX_HISTORY_ITEMS {
            tracing::debug!(
                "Persisted history holds {} entries, keeping newest {}",
                entries.len(),
                MAX_HISTORY_ITEMS
            );
            entries.truncate(MAX_HISTORY_ITEMS);
        }
        store.entries = entries;
        store
    }

    /// Attach the renderer invoked after every mutation
    pub fn with_renderer(mut self, renderer: impl HistoryRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Replace the clock used for ids and timestamps
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Current log, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Backing storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the backing storage. Changes made here are not
    /// reflected in memory until the store is reopened.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Redraw the visible list from the in-memory log
    pub fn render(&mut self) {
        self.renderer.render(&self.entries);
    }

    /// Read the persisted log. Missing, unreadable or corrupt data yields
    /// an empty log; individual malformed entries are skipped.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let stored = match self.storage.get_item(HISTORY_STORAGE_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Error loading history from storage: {}", e);
                return Vec::new();
            }
        };

        let values: Vec<Value> = match serde_json::from_str(&stored) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Error parsing stored history: {}", e);
                return Vec::new();
            }
        };

        values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping malformed history entry {}: {}", index, e);
                    None
                }
            })
            .collect()
    }

    /// Replace the whole log and persist it
    pub fn save(&mut self, mut entries: Vec<HistoryEntry>) {
        entries.truncate(MAX_HISTORY_ITEMS);
        self.entries = entries;
        self.persist();
    }

    /// Remove the persisted log and empty the store. Safe to repeat.
    pub fn clear(&mut self) {
        if let Err(e) = self.storage.remove_item(HISTORY_STORAGE_KEY) {
            tracing::warn!("Error clearing history from storage: {}", e);
        }
        self.entries.clear();
        tracing::debug!("History cleared");
        self.render();
    }

    /// Record a generation and return its id.
    ///
    /// Extra fields are stored alongside the fixed ones; a key naming a
    /// fixed field is ignored.
    pub fn add(
        &mut self,
        requirement: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<String>,
        extra: Map<String, Value>,
    ) -> EntryId {
        let timestamp = self.next_timestamp();
        let id = self.next_id(&timestamp);
        let entry = HistoryEntry::new(id, timestamp, requirement, code, language, extra);

        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ITEMS);
        self.persist();
        tracing::debug!(id, len = self.entries.len(), "History entry added");
        self.render();
        id
    }

    /// Record that a template was picked, before any code exists
    pub fn add_template_usage(&mut self, template: &TemplateSelection) -> EntryId {
        let mut extra = Map::new();
        extra.insert("template".into(), Value::String(template.name.clone()));
        extra.insert("category".into(), opt_string(&template.category));
        extra.insert("framework".into(), opt_string(&template.framework));

        let requirement = template.requirement().to_string();
        self.add(requirement, "", template.language.clone(), extra)
    }

    /// Drop the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let initial_len = self.entries.len();
        self.entries.retain(|e| e.id != id);

        if self.entries.len() < initial_len {
            self.persist();
            tracing::debug!(id, "History entry removed");
            self.render();
            true
        } else {
            false
        }
    }

    /// Find an entry by id
    pub fn find(&self, id: EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Form state for putting an entry back into the editor
    pub fn reload(&self, id: EntryId) -> Option<ReloadedForm> {
        self.find(id).map(|entry| ReloadedForm {
            requirement: entry.requirement.clone(),
            language: entry.language.clone(),
            code: entry.code.clone(),
            char_count: entry.requirement.encode_utf16().count(),
        })
    }

    fn persist(&mut self) {
        let content = match serde_json::to_string(&self.entries) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Error serializing history: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(HISTORY_STORAGE_KEY, &content) {
            tracing::warn!("Error saving history to storage: {}", e);
        }
    }

    /// Millisecond-precision now, never earlier than the newest entry so
    /// the log stays ordered even if the clock steps back.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = (self.clock)().trunc_subsecs(3);
        match self.entries.first() {
            Some(newest) if newest.timestamp > now => newest.timestamp,
            _ => now,
        }
    }

    /// Epoch milliseconds of `timestamp`, bumped past any id already in use.
    /// If the largest id is `EntryId::MAX` the nearest free id below the
    /// candidate is used instead.
    fn next_id(&self, timestamp: &DateTime<Utc>) -> EntryId {
        let candidate = EntryId::try_from(timestamp.timestamp_millis()).unwrap_or_default();
        let Some(max) = self.entries.iter().map(|e| e.id).max() else {
            return candidate;
        };
        if candidate > max {
            return candidate;
        }
        if let Some(next) = max.checked_add(1) {
            return next;
        }

        tracing::warn!("History id space exhausted above {}, reusing a lower id", candidate);
        let mut id = candidate;
        while self.find(id).is_some() {
            id = id.wrapping_sub(1);
        }
        id
    }
}

fn opt_string(value: &Option<String>) -> Value {
    value.clone().map(Value::String).unwrap_or(Value::Null)
}
