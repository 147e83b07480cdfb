// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Generation history
//!
//! A bounded, newest-first log of generation actions persisted into
//! session storage, with an injected renderer that redraws the visible
//! list after every mutation.

pub mod entry;
pub mod render;
pub mod store;

pub use entry::{EntryId, HistoryEntry};
pub use render::{HistoryPreview, HistoryRenderer, NullRenderer, TextRenderer};
pub use store::{HistoryStore, ReloadedForm, HISTORY_STORAGE_KEY, MAX_HISTORY_ITEMS};
