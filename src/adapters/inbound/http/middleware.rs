use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// CORS policy for the API: any origin, the four API methods and JSON bodies
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
