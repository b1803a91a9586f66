//! Preference store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing preferences
///
/// These never cross the public `get`/`set` boundary of
/// [`PreferenceStore`](super::PreferenceStore); they are logged and collapsed
/// into a default value there.
#[derive(Error, Debug)]
pub enum PreferenceError {
    /// I/O operation on the backing file failed
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded or decoded as JSON
    #[error("Serialization error for key '{key}': {message}")]
    Serialization { key: String, message: String },

    /// The preference file itself is not a valid key/value document
    #[error("Corrupt preference file {path:?}: {message}")]
    CorruptFile { path: PathBuf, message: String },

    /// Backend lock was poisoned by a panicking writer
    #[error("Lock error: {0}")]
    Lock(String),
}

impl PreferenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PreferenceError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialization(key: &str, err: serde_json::Error) -> Self {
        PreferenceError::Serialization {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for preference operations
pub type PreferenceResult<T> = Result<T, PreferenceError>;
