use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::{
    path::{Path as ObjectPath, PathPart},
    Attribute, AttributeValue, Attributes,
    ObjectStore as ApacheObjectStore, PutOptions, PutPayload,
};
use std::sync::Arc;

use super::error::from_store_error;
use crate::{
    domain::{errors::StorageResult, value_objects::StorageKey},
    ports::storage::BlobStore,
};

/// Adapter that implements our BlobStore trait using Apache object_store
pub struct ObjectStoreBlobStore {
    inner: Arc<dyn ApacheObjectStore>,
    content_type_attributes: bool,
}

impl ObjectStoreBlobStore {
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self {
            inner: store,
            content_type_attributes: true,
        }
    }

    /// Skip the content-type attribute on writes.
    /// The local filesystem store rejects attributes.
    pub fn without_content_type(mut self) -> Self {
        self.content_type_attributes = false;
        self
    }

    /// Each key is exactly one path segment. Delimiters and other reserved
    /// characters are percent-encoded, so distinct keys never share a blob.
    fn path(key: &StorageKey) -> ObjectPath {
        ObjectPath::from_iter([PathPart::from(key.as_str())])
    }
}

#[async_trait]
impl BlobStore for ObjectStoreBlobStore {
    async fn probe(&self) -> StorageResult<()> {
        let mut stream = self.inner.list(None);
        match stream.next().await {
            None | Some(Ok(_)) => Ok(()),
            Some(Err(e)) => Err(e.into()),
        }
    }

    async fn get(&self, key: &StorageKey) -> StorageResult<Option<Bytes>> {
        let result = match self.inner.get(&Self::path(key)).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(from_store_error(e, key)),
        };

        let bytes = result.bytes().await.map_err(|e| from_store_error(e, key))?;
        Ok(Some(bytes))
    }

    async fn put(&self, key: &StorageKey, data: Bytes, content_type: &str) -> StorageResult<()> {
        let mut attributes = Attributes::new();
        if self.content_type_attributes {
            attributes.insert(
                Attribute::ContentType,
                AttributeValue::from(content_type.to_string()),
            );
        }
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&Self::path(key), PutPayload::from(data), opts)
            .await
            .map_err(|e| from_store_error(e, key))?;

        Ok(())
    }

    async fn exists(&self, key: &StorageKey) -> StorageResult<bool> {
        match self.inner.head(&Self::path(key)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(from_store_error(e, key)),
        }
    }

    async fn delete(&self, key: &StorageKey) -> StorageResult<()> {
        match self.inner.delete(&Self::path(key)).await {
            // Someone else removed it between our existence check and now
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(from_store_error(e, key)),
        }
    }

    fn describe(&self) -> String {
        self.inner.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn adapter() -> (Arc<InMemory>, ObjectStoreBlobStore) {
        let store = Arc::new(InMemory::new());
        (store.clone(), ObjectStoreBlobStore::new(store))
    }

    #[tokio::test]
    async fn test_probe_on_empty_bucket() {
        let (_, blobs) = adapter();
        assert!(blobs.probe().await.is_ok());
    }

    #[tokio::test]
    async fn test_put_get_exists_delete() {
        let (_, blobs) = adapter();
        let key = StorageKey::new("notes").unwrap();

        assert_eq!(blobs.get(&key).await.unwrap(), None);
        assert!(!blobs.exists(&key).await.unwrap());

        blobs
            .put(&key, Bytes::from_static(b"{\"a\":1}"), "application/json")
            .await
            .unwrap();
        assert!(blobs.exists(&key).await.unwrap());
        assert_eq!(
            blobs.get(&key).await.unwrap(),
            Some(Bytes::from_static(b"{\"a\":1}"))
        );

        blobs.delete(&key).await.unwrap();
        assert!(!blobs.exists(&key).await.unwrap());
        // Deleting again is not an error
        blobs.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_put_records_content_type() {
        let (store, blobs) = adapter();
        let key = StorageKey::new("typed").unwrap();
        blobs
            .put(&key, Bytes::from_static(b"1"), "application/json")
            .await
            .unwrap();

        let result = store.get(&ObjectPath::from("typed")).await.unwrap();
        assert_eq!(
            result.attributes.get(&Attribute::ContentType),
            Some(&AttributeValue::from("application/json"))
        );
    }

    #[tokio::test]
    async fn test_keys_with_delimiters_stay_distinct() {
        let (store, blobs) = adapter();
        let keys = ["a/b", "a//b", "x", "x/", "/", "."];

        for (i, raw) in keys.iter().enumerate() {
            let key = StorageKey::new(*raw).unwrap();
            blobs
                .put(&key, Bytes::from(i.to_string()), "application/json")
                .await
                .unwrap();
        }

        for (i, raw) in keys.iter().enumerate() {
            let key = StorageKey::new(*raw).unwrap();
            assert_eq!(
                blobs.get(&key).await.unwrap(),
                Some(Bytes::from(i.to_string())),
                "key {raw:?}"
            );
        }

        // One blob per key, none of them nested
        let listed: Vec<_> = store
            .list(None)
            .map(|meta| meta.unwrap().location)
            .collect()
            .await;
        assert_eq!(listed.len(), keys.len());
        assert!(listed.iter().all(|path| path.parts().count() == 1));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let (_, blobs) = adapter();
        let key = StorageKey::new("layout").unwrap();
        blobs
            .put(&key, Bytes::from_static(b"1"), "application/json")
            .await
            .unwrap();
        blobs
            .put(&key, Bytes::from_static(b"2"), "application/json")
            .await
            .unwrap();
        assert_eq!(blobs.get(&key).await.unwrap(), Some(Bytes::from_static(b"2")));
    }
}
