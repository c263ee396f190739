use std::{future::Future, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, warn};

use super::availability::BackendAvailability;
use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{LoadOutcome, PingOutcome, WriteOutcome},
        value_objects::StorageKey,
    },
    ports::services::StorageService,
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Default bound on a single remote call
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Storage proxy in front of an optional remote blob store.
///
/// Every operation consults the availability tracker first and degrades to a
/// local-storage fallback instead of failing. Backend-level errors trip the
/// tracker; per-blob errors are only reported.
pub struct StorageProxy {
    availability: BackendAvailability,
    operation_timeout: Duration,
    backend_label: String,
}

impl StorageProxy {
    pub fn new(availability: BackendAvailability, backend_label: impl Into<String>) -> Self {
        Self {
            availability,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            backend_label: backend_label.into(),
        }
    }

    /// A proxy whose backend is permanently unavailable
    pub fn offline() -> Self {
        Self::new(BackendAvailability::offline(), "none")
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    pub fn availability(&self) -> &BackendAvailability {
        &self.availability
    }

    /// Run a remote call under the operation timeout
    async fn call<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = StorageResult<T>>,
    ) -> StorageResult<T> {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout {
                operation,
                timeout: self.operation_timeout,
            }),
        }
    }

    /// Record a failed remote call and return the text to show the client
    fn absorb(&self, operation: &str, key: &StorageKey, err: StorageError) -> String {
        if err.is_backend_failure() {
            self.availability.mark_unavailable();
        } else {
            warn!("Storage {} failed for key '{}': {}", operation, key, err);
        }
        err.to_string()
    }
}

#[async_trait]
impl StorageService for StorageProxy {
    async fn ping(&self) -> PingOutcome {
        let Some(store) = self.availability.store() else {
            return PingOutcome::Offline;
        };

        match self.call("probe", store.probe()).await {
            Ok(()) => PingOutcome::Online,
            Err(e) => {
                // Any probe failure takes the backend offline
                self.availability.mark_unavailable();
                PingOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn load(&self, key: &StorageKey) -> LoadOutcome {
        let Some(store) = self.availability.store() else {
            return LoadOutcome::Offline;
        };

        let bytes = match self.call("get", store.get(key)).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) | Err(StorageError::NotFound { .. }) => {
                debug!("Key '{}' not found in storage", key);
                return LoadOutcome::NotFound;
            }
            Err(e) => {
                return LoadOutcome::Failed {
                    error: self.absorb("load", key, e),
                }
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => LoadOutcome::Found(value),
            Err(e) => LoadOutcome::Failed {
                error: self.absorb("load", key, e.into()),
            },
        }
    }

    async fn save(&self, key: &StorageKey, value: Value) -> WriteOutcome {
        let Some(store) = self.availability.store() else {
            return WriteOutcome::Offline;
        };

        let result = match serde_json::to_vec(&value) {
            Ok(body) => {
                self.call("put", store.put(key, Bytes::from(body), JSON_CONTENT_TYPE))
                    .await
            }
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => {
                debug!("Saved key '{}'", key);
                WriteOutcome::Completed
            }
            Err(e) => WriteOutcome::Failed {
                error: self.absorb("save", key, e),
            },
        }
    }

    async fn delete(&self, key: &StorageKey) -> WriteOutcome {
        let Some(store) = self.availability.store() else {
            return WriteOutcome::Offline;
        };

        let result = match self.call("exists", store.exists(key)).await {
            Ok(true) => self.call("delete", store.delete(key)).await,
            Ok(false) => Ok(()),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) | Err(StorageError::NotFound { .. }) => {
                debug!("Deleted key '{}'", key);
                WriteOutcome::Completed
            }
            Err(e) => WriteOutcome::Failed {
                error: self.absorb("delete", key, e),
            },
        }
    }

    fn is_available(&self) -> bool {
        self.availability.is_available()
    }

    fn backend_label(&self) -> &str {
        &self.backend_label
    }
}
