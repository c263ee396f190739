// Infrastructure error conversions
pub mod error;

pub mod factory;
pub mod object_store_adapter;

// Re-export key types
pub use factory::{create_in_memory_store, create_local_store, create_s3_store, S3Config};
pub use object_store_adapter::ObjectStoreBlobStore;
