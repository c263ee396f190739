use std::time::Duration;

use thiserror::Error;

use crate::domain::value_objects::StorageKey;

/// Errors returned by blob store operations.
///
/// The proxy never turns these into HTTP error statuses. It only needs to know
/// whether a failure says something about the backend as a whole, see
/// [`StorageError::is_backend_failure`].
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The blob does not exist
    #[error("Object not found: {key}")]
    NotFound { key: StorageKey },

    /// The store could not be reached, refused our credentials, or failed in
    /// a way that is not specific to one blob
    #[error("Storage backend unavailable: {message}")]
    BackendUnavailable { message: String },

    /// The remote call did not finish in time
    #[error("Storage operation '{operation}' timed out after {}s", .timeout.as_secs())]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// The store rejected an operation on a single blob
    #[error("Storage operation failed: {message}")]
    OperationFailed { message: String },

    /// Stored content could not be encoded or decoded as JSON
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The backend client could not be constructed
    #[error("Storage configuration error: {message}")]
    Configuration { message: String },
}

impl StorageError {
    /// Whether this error means the backend as a whole is unusable.
    ///
    /// Per-blob problems (missing blob, bad content, a rejected path) leave the
    /// availability state alone.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            StorageError::BackendUnavailable { .. }
                | StorageError::Timeout { .. }
                | StorageError::Configuration { .. }
        )
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_failure_classification() {
        let key = StorageKey::new("k").unwrap();
        assert!(!StorageError::NotFound { key }.is_backend_failure());
        assert!(!StorageError::OperationFailed {
            message: "bad path".into()
        }
        .is_backend_failure());
        assert!(!StorageError::Serialization {
            message: "eof".into()
        }
        .is_backend_failure());

        assert!(StorageError::BackendUnavailable {
            message: "connection refused".into()
        }
        .is_backend_failure());
        assert!(StorageError::Timeout {
            operation: "get",
            timeout: Duration::from_secs(10)
        }
        .is_backend_failure());
    }

    #[test]
    fn test_timeout_display() {
        let err = StorageError::Timeout {
            operation: "put",
            timeout: Duration::from_secs(3),
        };
        assert_eq!(err.to_string(), "Storage operation 'put' timed out after 3s");
    }
}
