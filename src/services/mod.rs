pub mod availability;
mod storage_proxy;

pub use availability::BackendAvailability;
pub use storage_proxy::{StorageProxy, DEFAULT_OPERATION_TIMEOUT};
