use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    Json,
};
use http::HeaderMap;

use crate::adapters::inbound::http::{
    dto::{unix_timestamp, DebugInfoDto},
    error::ApiError,
    router::{AppState, API_ENDPOINTS},
};

/// Report server metadata and the request as the server saw it
pub async fn debug_info(
    State(app_state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Json<DebugInfoDto> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    Json(DebugInfoDto {
        server_time: unix_timestamp(),
        cloud_storage_available: app_state.storage_service.is_available(),
        storage_backend: app_state.storage_service.backend_label().to_string(),
        path,
        method: method.to_string(),
        headers,
        server_version: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        api_endpoints: API_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

/// Answer CORS preflight requests that reach the router
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other path under /api
pub async fn api_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        path: uri.path().to_string(),
    }
}
