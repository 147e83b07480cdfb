// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! codegen - client-side bookkeeping for the code generator.
//!
//! This crate exposes:
//! - `history`: the bounded, newest-first generation log and its renderers
//! - `storage`: the session storage port with in-memory and file backends
//! - `settings`: persisted generation preferences
//! - `templates`: template hand-off and catalogue filtering
//! - `validation`: form checks shared by the generator, sign-up and profile forms
//! - `config`, `cli`: the `codegen` binary's configuration and commands

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod settings;
pub mod storage;
pub mod templates;
pub mod validation;

pub use error::{CodegenError, Result};
