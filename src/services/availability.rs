use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tracing::{info, warn};

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::AvailabilityState,
    },
    ports::storage::BlobStore,
};

/// Backend availability tracker.
///
/// Decides once at startup whether the remote store is usable and only ever
/// moves from available to unavailable afterwards. There is no re-probe: a
/// backend that failed stays offline until the process restarts, which keeps
/// clients from flapping between tiers.
pub struct BackendAvailability {
    available: AtomicBool,
    store: Option<Arc<dyn BlobStore>>,
}

impl BackendAvailability {
    /// Probe a freshly constructed store and keep it if the probe succeeds.
    ///
    /// Never fails. Construction errors, probe errors and probe timeouts all
    /// leave the tracker unavailable with no handle.
    pub async fn initialize(
        store: StorageResult<Arc<dyn BlobStore>>,
        probe_timeout: Duration,
    ) -> Self {
        let store = match store {
            Ok(store) => store,
            Err(e) => {
                warn!("Could not initialize storage client: {}", e);
                return Self::offline();
            }
        };

        let probe = match tokio::time::timeout(probe_timeout, store.probe()).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout {
                operation: "probe",
                timeout: probe_timeout,
            }),
        };

        match probe {
            Ok(()) => {
                info!("Connected to storage backend {}", store.describe());
                Self {
                    available: AtomicBool::new(true),
                    store: Some(store),
                }
            }
            Err(e) => {
                warn!(
                    "Storage backend {} failed its connectivity probe: {}",
                    store.describe(),
                    e
                );
                Self::offline()
            }
        }
    }

    /// A tracker that is permanently unavailable
    pub fn offline() -> Self {
        Self {
            available: AtomicBool::new(false),
            store: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some() && self.available.load(Ordering::Acquire)
    }

    pub fn state(&self) -> AvailabilityState {
        self.is_available().into()
    }

    /// The backend handle, only while the backend is available
    pub fn store(&self) -> Option<&Arc<dyn BlobStore>> {
        if self.is_available() {
            self.store.as_ref()
        } else {
            None
        }
    }

    /// Switch to unavailable for the rest of the process lifetime
    pub fn mark_unavailable(&self) {
        if self.available.swap(false, Ordering::AcqRel) {
            warn!("Storage backend marked unavailable, serving local-storage fallbacks");
        }
    }
}

impl std::fmt::Debug for BackendAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendAvailability")
            .field("state", &self.state())
            .field("store", &self.store.as_ref().map(|s| s.describe()))
            .finish()
    }
}
