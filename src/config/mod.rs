// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration for codegen
//!
//! Resolves where session-scoped and long-lived storage live. The home
//! directory comes from `--data-dir`, then `$CODEGEN_HOME`, then
//! `~/.codegen`; an optional `config.toml` inside it can move the two
//! storage directories.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, Result};
use crate::storage::FileStorage;

/// Environment variable overriding the home directory
pub const HOME_ENV: &str = "CODEGEN_HOME";

/// Name of the optional config file inside the home directory
pub const CONFIG_FILE: &str = "config.toml";

/// Contents of `config.toml`. Relative paths are resolved against the
/// home directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory for session-scoped data (generation history)
    pub session_dir: Option<PathBuf>,
    /// Directory for data that outlives a session (generation settings)
    pub local_dir: Option<PathBuf>,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home: PathBuf,
    pub session_dir: PathBuf,
    pub local_dir: PathBuf,
}

impl Config {
    /// Get the codegen home directory (~/.codegen or $CODEGEN_HOME).
    pub fn codegen_home() -> PathBuf {
        if let Ok(home) = std::env::var(HOME_ENV) {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".codegen")
    }

    /// Load configuration, preferring an explicit data directory
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        let home = data_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::codegen_home);
        Self::load_from(home)
    }

    /// Load configuration rooted at `home`
    pub fn load_from(home: PathBuf) -> Result<Self> {
        let path = home.join(CONFIG_FILE);
        let file = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str::<ConfigFile>(&content).map_err(|e| {
                CodegenError::Config(format!("Invalid {}: {}", path.display(), e))
            })?
        } else {
            ConfigFile::default()
        };

        let resolve = |dir: Option<PathBuf>, default: &str| match dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => home.join(dir),
            None => home.join(default),
        };

        Ok(Self {
            session_dir: resolve(file.session_dir, "session"),
            local_dir: resolve(file.local_dir, "local"),
            home,
        })
    }

    /// Storage for the generation history
    pub fn session_storage(&self) -> FileStorage {
        FileStorage::open(&self.session_dir)
    }

    /// Storage for generation settings
    pub fn local_storage(&self) -> FileStorage {
        FileStorage::open(&self.local_dir)
    }

    /// Drop everything stored for the current session
    pub fn end_session(&self) -> Result<()> {
        match std::fs::remove_dir_all(&self.session_dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
