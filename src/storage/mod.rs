// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Session-scoped key/value storage
//!
//! The history and settings stores persist through this port instead of
//! touching the filesystem directly, so tests can swap in an in-memory
//! backend with simulated quota and disabled-storage failures.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Result type for storage backends
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// String key/value storage with browser-storage semantics.
pub trait SessionStorage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}
