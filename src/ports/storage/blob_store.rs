use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{errors::StorageResult, value_objects::StorageKey};

/// Port for the remote keyed blob store.
/// This abstracts the actual storage backend (S3, local disk, memory).
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Cheap connectivity check, e.g. listing at most one blob
    async fn probe(&self) -> StorageResult<()>;

    /// Fetch a blob, `None` if it does not exist
    async fn get(&self, key: &StorageKey) -> StorageResult<Option<Bytes>>;

    /// Store a blob, replacing any existing content
    async fn put(&self, key: &StorageKey, data: Bytes, content_type: &str) -> StorageResult<()>;

    /// Check if a blob exists
    async fn exists(&self, key: &StorageKey) -> StorageResult<bool>;

    /// Remove a blob
    async fn delete(&self, key: &StorageKey) -> StorageResult<()>;

    /// Human readable description used in logs
    fn describe(&self) -> String;
}
