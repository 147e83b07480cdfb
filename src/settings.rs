// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Generation preferences persisted in local storage

use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, Result};
use crate::storage::SessionStorage;

/// Storage key holding the generation settings
pub const SETTINGS_STORAGE_KEY: &str = "generationSettings";

/// User preferences applied to new generations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    pub language: String,
    pub framework: String,
    pub theme: String,
    pub code_style: String,
    pub add_comments: bool,
    pub generate_docs: bool,
    pub auto_format: bool,
    pub check_errors: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            language: "typescript".to_string(),
            framework: "react".to_string(),
            theme: "light".to_string(),
            code_style: "standard".to_string(),
            add_comments: true,
            generate_docs: true,
            auto_format: false,
            check_errors: true,
        }
    }
}

impl GenerationSettings {
    /// Setting keys accepted by [`GenerationSettings::set`]
    pub const KEYS: [&'static str; 8] = [
        "language",
        "framework",
        "theme",
        "codeStyle",
        "addComments",
        "generateDocs",
        "autoFormat",
        "checkErrors",
    ];

    /// Set a single setting from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "language" => self.language = value.to_string(),
            "framework" => self.framework = value.to_string(),
            "theme" => self.theme = value.to_string(),
            "codeStyle" => self.code_style = value.to_string(),
            "addComments" => self.add_comments = parse_bool(key, value)?,
            "generateDocs" => self.generate_docs = parse_bool(key, value)?,
            "autoFormat" => self.auto_format = parse_bool(key, value)?,
            "checkErrors" => self.check_errors = parse_bool(key, value)?,
            _ => {
                return Err(CodegenError::InvalidInput(format!(
                    "Unknown setting '{}'. Valid settings: {}",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(CodegenError::InvalidInput(format!(
            "Setting '{}' expects true or false, got '{}'",
            key, value
        ))),
    }
}

/// Load/save/reset of [`GenerationSettings`] over a storage backend.
/// Like the history store, storage problems are logged and swallowed.
pub struct GenerationSettingsStore<S: SessionStorage> {
    storage: S,
}

impl<S: SessionStorage> GenerationSettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stored settings, or defaults when nothing usable is stored
    pub fn load(&self) -> GenerationSettings {
        let stored = match self.storage.get_item(SETTINGS_STORAGE_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return GenerationSettings::default(),
            Err(e) => {
                tracing::warn!("Error loading generation settings: {}", e);
                return GenerationSettings::default();
            }
        };

        serde_json::from_str(&stored).unwrap_or_else(|e| {
            tracing::warn!("Error parsing generation settings: {}", e);
            GenerationSettings::default()
        })
    }

    /// Persist the settings, replacing any stored value
    pub fn save(&mut self, settings: &GenerationSettings) {
        let content = match serde_json::to_string(settings) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Error serializing generation settings: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(SETTINGS_STORAGE_KEY, &content) {
            tracing::warn!("Error saving generation settings: {}", e);
        }
    }

    /// Forget stored settings and return the defaults
    pub fn reset(&mut self) -> GenerationSettings {
        if let Err(e) = self.storage.remove_item(SETTINGS_STORAGE_KEY) {
            tracing::warn!("Error resetting generation settings: {}", e);
        }
        GenerationSettings::default()
    }
}
