use axum::{http::Method, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod error;
pub mod flights;
pub mod search;
pub mod state;

pub use state::AppState;

/// Success envelope shared by every endpoint: `{ success: true, data }`.
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

pub fn app(state: AppState) -> Router {
    // The frontend is served from a different origin in development, so CORS
    // stays permissive like the original server.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .merge(search::routes())
        .merge(flights::routes())
        .merge(bookings::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Flight booking API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
