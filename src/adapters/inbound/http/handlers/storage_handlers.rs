use axum::{
    extract::{Query, State},
    Json,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{
    adapters::inbound::http::{
        dto::{
            DeleteRequestDto, LoadQueryDto, LoadResponseDto, PingResponseDto, SaveRequestDto,
            WriteResponseDto,
        },
        error::ApiError,
        router::AppState,
    },
    domain::value_objects::StorageKey,
};

/// Parse a JSON request body.
/// Unparseable bodies are reported as internal errors rather than rejections.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

/// Handle a backend connectivity check
pub async fn ping(State(app_state): State<AppState>) -> Json<PingResponseDto> {
    let outcome = app_state.storage_service.ping().await;
    Json(outcome.into())
}

/// Handle loading one value
pub async fn load(
    State(app_state): State<AppState>,
    Query(query): Query<LoadQueryDto>,
) -> Result<Json<LoadResponseDto>, ApiError> {
    let key = StorageKey::from_optional(query.key)?;

    let outcome = app_state.storage_service.load(&key).await;
    Ok(Json(outcome.into()))
}

/// Handle saving one value
pub async fn save(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<WriteResponseDto>, ApiError> {
    let request: SaveRequestDto = parse_body(&body)?;
    let key = StorageKey::from_optional(request.key)?;

    let outcome = app_state.storage_service.save(&key, request.data).await;
    Ok(Json(WriteResponseDto::saved(outcome)))
}

/// Handle deleting one value
pub async fn delete_item(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<WriteResponseDto>, ApiError> {
    let request: DeleteRequestDto = parse_body(&body)?;
    let key = StorageKey::from_optional(request.key)?;

    let outcome = app_state.storage_service.delete(&key).await;
    Ok(Json(WriteResponseDto::deleted(outcome)))
}
