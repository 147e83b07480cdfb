// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for codegen
//!
//! Storage failures are kept in their own enum because the stores swallow
//! them; everything else surfaces to the CLI as a `CodegenError`.

use thiserror::Error;

/// Main error type for codegen operations
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// History entry lookup failed
    #[error("History entry not found: {0}")]
    EntryNotFound(u64),
}

/// Errors raised by a session storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// Writing the value would exceed the backend's quota
    #[error("Quota exceeded: writing {requested} bytes exceeds limit of {limit}")]
    QuotaExceeded { requested: usize, limit: usize },

    /// Storage is turned off for this session
    #[error("Storage is disabled")]
    Disabled,

    /// Key cannot be mapped onto the backend
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Underlying file access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

impl From<toml::de::Error> for CodegenError {
    fn from(err: toml::de::Error) -> Self {
        CodegenError::Toml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_conversion() {
        let err: CodegenError = StorageError::Disabled.into();
        assert!(matches!(err, CodegenError::Storage(StorageError::Disabled)));
        assert_eq!(err.to_string(), "Storage error: Storage is disabled");
    }

    #[test]
    fn test_quota_exceeded_display() {
        let err = StorageError::QuotaExceeded {
            requested: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "Quota exceeded: writing 2048 bytes exceeds limit of 1024"
        );
    }

    #[test]
    fn test_entry_not_found_display() {
        let err = CodegenError::EntryNotFound(1700000000000);
        assert!(err.to_string().contains("1700000000000"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: CodegenError = toml_err.into();
        assert!(matches!(err, CodegenError::Toml(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CodegenError = json_err.into();
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
