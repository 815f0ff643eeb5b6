//! Error types for the i18n core and its storage boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or addressing translation data.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A language code outside the supported set
    #[error("Unsupported language code: '{0}'")]
    UnsupportedLanguage(String),

    /// A supported language has no translation table
    #[error("No translation table loaded for '{0}'")]
    MissingTable(&'static str),

    /// A table file could not be read
    #[error("Failed to read translation table {path}: {source}")]
    TableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table is not a flat JSON object of strings
    #[error("Invalid translation table for '{language}': {source}")]
    TableParse {
        language: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by durable preference storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file {path} is not a JSON object: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode storage contents: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
