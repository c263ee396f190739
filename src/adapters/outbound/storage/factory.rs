//! Construction of the concrete blob store backends.
//!
//! Every constructor reports problems as [`StorageError::Configuration`] so the
//! availability tracker can translate them into the offline state.

use object_store::{aws::AmazonS3Builder, local::LocalFileSystem, memory::InMemory};
use std::{path::PathBuf, sync::Arc};

use super::ObjectStoreBlobStore;
use crate::{
    domain::errors::{StorageError, StorageResult},
    ports::storage::BlobStore,
};

/// Configuration for the S3 storage backend
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    /// When unset the builder keeps AWS_REGION / AWS_DEFAULT_REGION from the environment
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Custom endpoint for S3 compatible services such as MinIO
    pub endpoint: Option<String>,
    pub allow_http: bool,
}

/// Create an S3 backed blob store for `bucket`.
///
/// Credentials that are not given explicitly are picked up from the standard
/// AWS environment variables.
pub fn create_s3_store(bucket: &str, config: &S3Config) -> StorageResult<Arc<dyn BlobStore>> {
    let mut builder = AmazonS3Builder::from_env()
        .with_bucket_name(bucket)
        .with_allow_http(config.allow_http);

    if let Some(region) = &config.region {
        builder = builder.with_region(region);
    }

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &config.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder.with_endpoint(endpoint);
    }

    let store = builder.build().map_err(|e| StorageError::Configuration {
        message: format!("Failed to build S3 store: {e}"),
    })?;

    Ok(Arc::new(ObjectStoreBlobStore::new(Arc::new(store))))
}

/// Create a blob store rooted at `root/bucket` on the local filesystem
pub async fn create_local_store(root: PathBuf, bucket: &str) -> StorageResult<Arc<dyn BlobStore>> {
    let dir = root.join(bucket);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| StorageError::Configuration {
            message: format!("Failed to create storage directory {}: {e}", dir.display()),
        })?;

    let store = LocalFileSystem::new_with_prefix(&dir).map_err(|e| StorageError::Configuration {
        message: format!("Failed to open storage directory {}: {e}", dir.display()),
    })?;

    Ok(Arc::new(
        ObjectStoreBlobStore::new(Arc::new(store)).without_content_type(),
    ))
}

/// Create a process-local in-memory blob store
pub fn create_in_memory_store() -> Arc<dyn BlobStore> {
    Arc::new(ObjectStoreBlobStore::new(Arc::new(InMemory::new())))
}
