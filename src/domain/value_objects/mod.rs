mod storage_key;

pub use storage_key::StorageKey;
