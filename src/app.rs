use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    adapters::{
        inbound::http::router::AppState,
        outbound::storage::{create_in_memory_store, create_local_store, create_s3_store, S3Config},
    },
    services::{BackendAvailability, StorageProxy, DEFAULT_OPERATION_TIMEOUT},
};

/// Bucket used when none is configured
pub const DEFAULT_BUCKET_NAME: &str = "cyberpunk-gm-screen-data";

/// Ports tried in order when no port is configured
pub const DEFAULT_PORTS: [u16; 12] = [
    8888, 8889, 8890, 8891, 8892, 8893, 8894, 8895, 8896, 8897, 8898, 8899,
];

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub bucket_name: String,
    /// Bound on every remote call, including the startup probe
    pub operation_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::Disabled,
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// No remote store; every operation answers with the local-storage fallback
    Disabled,
    InMemory,
    Local { root: PathBuf },
    S3(S3Config),
}

impl StorageBackend {
    pub fn label(&self) -> &'static str {
        match self {
            StorageBackend::Disabled => "none",
            StorageBackend::InMemory => "memory",
            StorageBackend::Local { .. } => "local",
            StorageBackend::S3(_) => "s3",
        }
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure the bucket name
    pub fn with_bucket_name(mut self, bucket_name: impl Into<String>) -> Self {
        self.config.bucket_name = bucket_name.into();
        self
    }

    /// Configure the remote call timeout
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.config.operation_timeout = timeout;
        self
    }

    /// Initialize the availability tracker.
    ///
    /// Backend problems never fail the build; they leave the tracker offline.
    pub async fn build_availability(&self) -> BackendAvailability {
        let bucket = &self.config.bucket_name;
        let timeout = self.config.operation_timeout;

        match &self.config.storage_backend {
            StorageBackend::Disabled => BackendAvailability::offline(),
            StorageBackend::InMemory => {
                BackendAvailability::initialize(Ok(create_in_memory_store()), timeout).await
            }
            StorageBackend::Local { root } => {
                let store = create_local_store(root.clone(), bucket).await;
                BackendAvailability::initialize(store, timeout).await
            }
            StorageBackend::S3(s3) => {
                BackendAvailability::initialize(create_s3_store(bucket, s3), timeout).await
            }
        }
    }

    /// Build the storage proxy
    pub async fn build_proxy(self) -> StorageProxy {
        let availability = self.build_availability().await;

        if availability.is_available() {
            info!(
                "CLOUD STORAGE: ENABLED (backend {}, bucket {})",
                self.config.storage_backend.label(),
                self.config.bucket_name
            );
        } else {
            info!("CLOUD STORAGE: DISABLED (local storage only)");
        }

        StorageProxy::new(availability, self.config.storage_backend.label())
            .with_operation_timeout(self.config.operation_timeout)
    }

    /// Build the complete application state
    pub async fn build(self) -> AppState {
        AppState::new(Arc::new(self.build_proxy().await))
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("No free port among {ports:?}")]
    NoFreePort { ports: Vec<u16> },
}

/// Ports to try: only the configured one, or the default list
pub fn candidate_ports(configured: Option<u16>) -> Vec<u16> {
    match configured {
        Some(port) => vec![port],
        None => DEFAULT_PORTS.to_vec(),
    }
}

/// Bind the first port in `ports` that is not already in use
pub async fn bind_first_available(host: &str, ports: &[u16]) -> Result<TcpListener, AppError> {
    for &port in ports {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                warn!("Port {} is already in use, trying another port...", port);
            }
            Err(source) => return Err(AppError::Bind { port, source }),
        }
    }

    Err(AppError::NoFreePort {
        ports: ports.to_vec(),
    })
}

/// Create an application whose backend is permanently offline
pub async fn create_offline_app() -> AppState {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::Disabled)
        .build()
        .await
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> AppState {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .build()
        .await
}
