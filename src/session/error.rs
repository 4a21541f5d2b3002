//! Session storage error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](super::KeyValueStore) backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings
    #[error("Corrupt session file {path:?}: {error}")]
    Corrupt { path: PathBuf, error: String },

    /// Serializing a value for storage failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The storage area refused the write (quota, private mode, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A lock guarding the store was poisoned
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for session storage operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: quota exceeded");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
