use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{
    models::{LoadOutcome, PingOutcome, WriteOutcome},
    value_objects::StorageKey,
};

/// Port for the storage proxy.
///
/// None of these operations fail. Backend problems are reported through the
/// outcome types so the HTTP layer can always answer with a 200.
#[async_trait]
pub trait StorageService: Send + Sync + 'static {
    async fn ping(&self) -> PingOutcome;

    async fn load(&self, key: &StorageKey) -> LoadOutcome;

    async fn save(&self, key: &StorageKey, value: Value) -> WriteOutcome;

    async fn delete(&self, key: &StorageKey) -> WriteOutcome;

    /// Current availability, without I/O
    fn is_available(&self) -> bool;

    /// Short name of the configured backend
    fn backend_label(&self) -> &str;
}
