use serde_json::Value;

/// Result of probing the backend
#[derive(Debug, Clone, PartialEq)]
pub enum PingOutcome {
    /// The probe succeeded
    Online,
    /// The backend was already marked unavailable, or never configured
    Offline,
    /// The probe failed and the backend is now marked unavailable
    Failed { error: String },
}

/// Result of loading one blob
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Found(Value),
    NotFound,
    /// The backend is unavailable; the caller should use its local copy
    Offline,
    /// The fetch failed; the caller should use its local copy
    Failed { error: String },
}

/// Result of a save or delete.
///
/// Every variant counts as success from the caller's point of view. The
/// fallback variants tell it that only its local copy was touched.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Completed,
    Offline,
    Failed { error: String },
}

impl LoadOutcome {
    pub fn use_local_storage(&self) -> bool {
        matches!(self, LoadOutcome::Offline | LoadOutcome::Failed { .. })
    }
}

impl WriteOutcome {
    pub fn use_local_storage(&self) -> bool {
        !matches!(self, WriteOutcome::Completed)
    }
}
