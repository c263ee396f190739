use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::models::{LoadOutcome, PingOutcome, WriteOutcome};

/// Seconds since the Unix epoch, with millisecond precision
pub fn unix_timestamp() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Query string for the load endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct LoadQueryDto {
    pub key: Option<String>,
}

/// Body of a save request
#[derive(Debug, Clone, Deserialize)]
pub struct SaveRequestDto {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// Body of a delete request
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequestDto {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PingStatus {
    Ok,
    Offline,
}

/// Response for the ping endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponseDto {
    pub status: PingStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: f64,
}

impl From<PingOutcome> for PingResponseDto {
    fn from(outcome: PingOutcome) -> Self {
        let (status, message, error) = match outcome {
            PingOutcome::Online => (PingStatus::Ok, "Cloud Storage is available", None),
            PingOutcome::Offline => (
                PingStatus::Offline,
                "Cloud Storage not configured, using offline mode",
                None,
            ),
            PingOutcome::Failed { error } => (
                PingStatus::Offline,
                "Error accessing Cloud Storage bucket",
                Some(error),
            ),
        };

        Self {
            status,
            message: message.to_string(),
            error,
            timestamp: unix_timestamp(),
        }
    }
}

/// Response for the load endpoint.
///
/// `data` is always present and is `null` whenever nothing usable was loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponseDto {
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_local_storage: Option<bool>,
}

impl From<LoadOutcome> for LoadResponseDto {
    fn from(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Found(data) => Self {
                data,
                message: None,
                use_local_storage: None,
            },
            LoadOutcome::NotFound => Self {
                data: Value::Null,
                message: Some("Item not found in cloud storage".to_string()),
                use_local_storage: None,
            },
            LoadOutcome::Offline => Self {
                data: Value::Null,
                message: Some("Cloud Storage not available, use local data".to_string()),
                use_local_storage: Some(true),
            },
            LoadOutcome::Failed { error } => Self {
                data: Value::Null,
                message: Some(format!("Error accessing data: {error}")),
                use_local_storage: Some(true),
            },
        }
    }
}

/// Response for save and delete.
///
/// `success` is always true: a write the server could not perform is handled
/// by the client's local copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResponseDto {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_local_storage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WriteResponseDto {
    pub fn saved(outcome: WriteOutcome) -> Self {
        Self::from_outcome(
            outcome,
            "Data saved to cloud storage",
            "Cloud Storage not available, saved to local storage",
            "Error saving data",
        )
    }

    pub fn deleted(outcome: WriteOutcome) -> Self {
        Self::from_outcome(
            outcome,
            "Data deleted from cloud storage",
            "Cloud Storage not available, removed from local storage only",
            "Error deleting data",
        )
    }

    fn from_outcome(outcome: WriteOutcome, done: &str, offline: &str, failed: &str) -> Self {
        let use_local_storage = outcome.use_local_storage().then_some(true);
        let (message, error) = match outcome {
            WriteOutcome::Completed => (done.to_string(), None),
            WriteOutcome::Offline => (offline.to_string(), None),
            WriteOutcome::Failed { error } => (format!("{failed}: {error}"), Some(error)),
        };

        Self {
            success: true,
            message: Some(message),
            use_local_storage,
            error,
        }
    }
}

/// Error body for client, routing and parsing errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<String>>,
}

impl ErrorResponseDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            path: None,
            available_endpoints: None,
        }
    }
}

/// Diagnostic snapshot returned by the debug endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugInfoDto {
    pub server_time: f64,
    pub cloud_storage_available: bool,
    pub storage_backend: String,
    pub path: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub server_version: String,
    pub api_endpoints: Vec<String>,
}
