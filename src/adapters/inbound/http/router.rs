use axum::{
    routing::{delete, get, post, MethodRouter},
    Router,
};
use std::{path::Path, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::{
    handlers::{api_not_found, debug_info, delete_item, load, ping, preflight, save},
    middleware::cors_layer,
};
use crate::ports::services::StorageService;

/// Endpoints listed by the debug and not-found responses
pub const API_ENDPOINTS: &[&str] = &[
    "/api/storage/ping",
    "/api/storage/load",
    "/api/storage/save",
    "/api/storage/delete",
    "/api/debug",
];

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage_service: Arc<dyn StorageService>,
}

impl AppState {
    pub fn new(storage_service: Arc<dyn StorageService>) -> Self {
        Self { storage_service }
    }
}

/// Handlers for any other path under `/api/`
fn unknown_api_path() -> MethodRouter<AppState> {
    get(api_not_found)
        .post(api_not_found)
        .delete(api_not_found)
        .options(preflight)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/debug", get(debug_info).options(preflight))
        .route("/api/storage/ping", get(ping).options(preflight))
        .route("/api/storage/load", get(load).options(preflight))
        .route("/api/storage/save", post(save).options(preflight))
        .route("/api/storage/delete", delete(delete_item).options(preflight))
        // The wildcard does not match an empty tail
        .route("/api/", unknown_api_path())
        .route("/api/{*path}", unknown_api_path())
}

fn with_layers(router: Router<AppState>, state: AppState) -> Router {
    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer()),
    )
}

/// Create a router serving only the API
pub fn create_api_router(state: AppState) -> Router {
    with_layers(api_routes(), state)
}

/// Create the main application router: the API plus static files from
/// `static_dir` for every other path
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let routes = api_routes().fallback_service(ServeDir::new(static_dir.as_ref()));
    with_layers(routes, state)
}
