use axum::{extract::State, routing::post, Json, Router};

use aerobook_core::normalize::{normalize, SearchResult};

use crate::state::AppState;
use crate::ApiSuccess;

pub fn routes() -> Router<AppState> {
    Router::new().route("/search", post(search_flights))
}

/// POST /search
///
/// Returns every journey's normalized flight options from the fixed dataset.
/// The UI collects route/date/trip-type criteria but this endpoint ignores
/// them by design: the dataset is a single fixture, and narrowing happens
/// client-side on price/stops/time only.
async fn search_flights(State(state): State<AppState>) -> Json<ApiSuccess<SearchResult>> {
    let result = normalize(&state.inventory);
    Json(ApiSuccess::new(result))
}
