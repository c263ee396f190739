#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use gm_screen_server::{
    create_router, BackendAvailability, BlobStore, ObjectStoreBlobStore, StorageError,
    StorageKey, StorageProxy, StorageResult, AppState,
};
use object_store::memory::InMemory;
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/static")
}

/// In-memory store that can be switched into a failing mode
pub struct SwitchableStore {
    pub memory: Arc<InMemory>,
    inner: ObjectStoreBlobStore,
    failing: Arc<AtomicBool>,
    hanging: Arc<AtomicBool>,
}

impl SwitchableStore {
    pub fn new() -> Arc<Self> {
        let memory = Arc::new(InMemory::new());
        Arc::new(Self {
            inner: ObjectStoreBlobStore::new(memory.clone()),
            memory,
            failing: Arc::new(AtomicBool::new(false)),
            hanging: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Make every call fail as if the backend went away
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make every call except the probe hang forever
    pub fn hang(&self, hanging: bool) {
        self.hanging.store(hanging, Ordering::SeqCst);
    }

    async fn check(&self) -> StorageResult<()> {
        if self.hanging.load(Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::BackendUnavailable {
                message: "connection reset by peer".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for SwitchableStore {
    async fn probe(&self) -> StorageResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::BackendUnavailable {
                message: "connection refused".to_string(),
            });
        }
        self.inner.probe().await
    }

    async fn get(&self, key: &StorageKey) -> StorageResult<Option<Bytes>> {
        self.check().await?;
        self.inner.get(key).await
    }

    async fn put(&self, key: &StorageKey, data: Bytes, content_type: &str) -> StorageResult<()> {
        self.check().await?;
        self.inner.put(key, data, content_type).await
    }

    async fn exists(&self, key: &StorageKey) -> StorageResult<bool> {
        self.check().await?;
        self.inner.exists(key).await
    }

    async fn delete(&self, key: &StorageKey) -> StorageResult<()> {
        self.check().await?;
        self.inner.delete(key).await
    }

    fn describe(&self) -> String {
        "Switchable".to_string()
    }
}

pub async fn proxy_for(store: Arc<dyn BlobStore>) -> StorageProxy {
    let availability = BackendAvailability::initialize(Ok(store), PROBE_TIMEOUT).await;
    StorageProxy::new(availability, "memory")
}

pub fn server_for(proxy: StorageProxy) -> TestServer {
    let state = AppState::new(Arc::new(proxy));
    TestServer::new(create_router(state, static_dir())).unwrap()
}

/// Server backed by a healthy store, plus the store's switch
pub async fn setup_healthy_server() -> (Arc<SwitchableStore>, TestServer) {
    let store = SwitchableStore::new();
    let proxy = proxy_for(store.clone()).await;
    (store, server_for(proxy))
}

/// Server whose backend never initialized
pub fn setup_offline_server() -> TestServer {
    server_for(StorageProxy::offline())
}
