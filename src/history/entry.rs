// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! History entry type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifier of a history entry (epoch milliseconds at creation)
pub type EntryId = u64;

/// Keys owned by the entry itself. Caller-supplied extra data may not
/// shadow them.
pub const FIXED_FIELDS: [&str; 5] = ["id", "timestamp", "requirement", "code", "language"];

/// One recorded generation or template-use action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// External handle used by reload and delete
    pub id: EntryId,
    /// Creation time, never mutated
    pub timestamp: DateTime<Utc>,
    /// Task description
    #[serde(default, deserialize_with = "null_as_empty")]
    pub requirement: String,
    /// Generated code (empty for template selections)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,
    /// Target language of the generation
    #[serde(default, deserialize_with = "null_as_empty")]
    pub language: String,
    /// Opaque pass-through metadata such as template, category, framework.
    /// Never holds a key from `FIXED_FIELDS`.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl HistoryEntry {
    /// Build an entry. Extra keys that collide with a fixed field are
    /// dropped; the fixed value always wins.
    pub fn new(
        id: EntryId,
        timestamp: DateTime<Utc>,
        requirement: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<String>,
        mut extra: Map<String, Value>,
    ) -> Self {
        for key in FIXED_FIELDS {
            if extra.remove(key).is_some() {
                tracing::debug!("Ignoring extra history field '{}' that shadows a fixed field", key);
            }
        }

        Self {
            id,
            timestamp,
            requirement: requirement.into(),
            code: code.into(),
            language: language.into(),
            extra,
        }
    }

    /// Pass-through metadata
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Add or replace a pass-through field. Keys naming a fixed field are
    /// refused so the flattened JSON never carries duplicate keys.
    pub fn insert_extra(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if FIXED_FIELDS.contains(&key.as_str()) {
            tracing::debug!("Refusing extra history field '{}' that shadows a fixed field", key);
            return false;
        }
        self.extra.insert(key, value);
        true
    }

    /// Template name, if the entry came from a template
    pub fn template(&self) -> Option<&str> {
        self.extra_str("template")
    }

    /// Template category
    pub fn category(&self) -> Option<&str> {
        self.extra_str("category")
    }

    /// Framework the generation targeted
    pub fn framework(&self) -> Option<&str> {
        self.extra_str("framework")
    }

    /// Look up a string-valued extra field
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
