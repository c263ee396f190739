use object_store::client::{HttpError, HttpErrorKind};
use std::{error::Error as StdError, io};

use crate::domain::{errors::StorageError, value_objects::StorageKey};

/// Convert an object_store error raised while working on `key`
pub fn from_store_error(err: object_store::Error, key: &StorageKey) -> StorageError {
    match err {
        object_store::Error::NotFound { .. } => StorageError::NotFound { key: key.clone() },
        other => other.into(),
    }
}

/// Whether anything in the error chain says the store could not be reached
fn is_transport_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(http) = e.downcast_ref::<HttpError>() {
            if matches!(
                http.kind(),
                HttpErrorKind::Connect
                    | HttpErrorKind::Request
                    | HttpErrorKind::Timeout
                    | HttpErrorKind::Interrupted
            ) {
                return true;
            }
        }
        if let Some(io) = e.downcast_ref::<io::Error>() {
            if matches!(
                io.kind(),
                io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::NotConnected
                    | io::ErrorKind::AddrNotAvailable
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::TimedOut
            ) {
                return true;
            }
        }
        current = e.source();
    }
    false
}

/// Convert object_store errors to domain storage errors.
///
/// Auth and configuration errors, and generic errors caused by the transport,
/// mean the backend is unusable. Anything else concerns a single path.
impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        let backend_level = match &err {
            object_store::Error::Generic { source, .. } => is_transport_failure(&**source),
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. }
            | object_store::Error::UnknownConfigurationKey { .. } => true,
            _ => false,
        };

        if backend_level {
            StorageError::BackendUnavailable {
                message: err.to_string(),
            }
        } else {
            StorageError::OperationFailed {
                message: err.to_string(),
            }
        }
    }
}
