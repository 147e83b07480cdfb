// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! In-memory storage backend

use std::collections::HashMap;

use super::{SessionStorage, StorageResult};
use crate::error::StorageError;

/// Map-backed storage with an optional byte quota.
///
/// The quota counts key and value bytes across all items, mirroring how
/// browsers account session storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    /// Create an empty, unbounded storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage that rejects writes beyond `limit` bytes
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Turn storage access on or off
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no keys are stored
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        if let Some(limit) = self.quota {
            let requested = self.used_bytes_excluding(key) + key.len() + value.len();
            if requested > limit {
                return Err(StorageError::QuotaExceeded { requested, limit });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        self.items.remove(key);
        Ok(())
    }
}
