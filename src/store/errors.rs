//! # Record Store Errors

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
///
/// None of these carry "not found": absence is reported as `Ok(None)` so the
/// caller decides how to shape it.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Reading, writing or renaming the backing file failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Backing file exists but is not a valid books document
    #[error("Corrupt backing file {path}: {message}")]
    Corrupt { path: String, message: String },

    /// Book list could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// A previous holder of the store lock panicked
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// I/O failure against `path`
    pub fn io(path: impl AsRef<std::path::Path>, err: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Undecodable backing file at `path`
    pub fn corrupt(path: impl AsRef<std::path::Path>, err: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = StoreError::io(
            "/tmp/db.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/db.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_corrupt_error_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StoreError::corrupt("db.json", json_err);
        assert!(err.to_string().starts_with("Corrupt backing file db.json"));
    }
}
