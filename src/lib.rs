pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - values, outcomes and errors
pub use domain::{
    AvailabilityState, LoadOutcome, PingOutcome, StorageError, StorageKey, StorageResult,
    ValidationError, WriteOutcome,
};

// Port types - interfaces for external systems
pub use ports::{BlobStore, StorageService};

// Service implementations - availability tracking and the storage proxy
pub use services::{BackendAvailability, StorageProxy};

// Application factory and configuration
pub use app::{
    bind_first_available, candidate_ports, create_in_memory_app, create_offline_app, AppBuilder,
    AppConfig, AppError, StorageBackend, DEFAULT_BUCKET_NAME, DEFAULT_PORTS,
};

// Adapter types - infrastructure implementations
pub use adapters::inbound::http::router::{create_api_router, create_router, AppState};
pub use adapters::outbound::storage::{ObjectStoreBlobStore, S3Config};
