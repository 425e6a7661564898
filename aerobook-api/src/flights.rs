use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use aerobook_core::selection::Selection;

use crate::error::{ApiJson, AppError};
use crate::state::AppState;
use crate::ApiSuccess;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectFlightRequest {
    #[serde(default)]
    search_id: Option<String>,
    #[serde(default)]
    journey_key: Option<String>,
    #[serde(default)]
    flight_id: Option<String>,
    #[serde(default)]
    fare_id: Option<String>,
}

/// Flattened summary returned for immediate UI display after a select.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectFlightResponse {
    selection_id: Uuid,
    from: String,
    to: String,
    departure: String,
    arrival: String,
    airlines: Vec<String>,
    stops: u32,
    price: String,
    brand_name: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/flight/select", post(select_flight))
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /flight/select
///
/// Re-resolves the journey/flight/fare against the authoritative inventory
/// (never against a previously returned search result) and persists a
/// write-once selection snapshot.
async fn select_flight(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SelectFlightRequest>,
) -> Result<(StatusCode, Json<ApiSuccess<SelectFlightResponse>>), AppError> {
    let (Some(search_id), Some(journey_key), Some(flight_id), Some(fare_id)) = (
        required(req.search_id),
        required(req.journey_key),
        required(req.flight_id),
        required(req.fare_id),
    ) else {
        return Err(AppError::ValidationError(
            "searchId, journeyKey, flightId and fareId are required".to_string(),
        ));
    };

    let (flight, fare) = state.inventory.resolve(&journey_key, &flight_id, &fare_id)?;
    let selection = Selection::new(search_id, journey_key, flight, fare);
    state.selections.create(&selection).await?;

    info!(
        "Selection {} created for flight {} fare {}",
        selection.id, selection.selected_flight.flight_id, selection.selected_fare.fare_id
    );

    let legs = &selection.selected_flight.flights;
    let (Some(first), Some(last)) = (legs.first(), legs.last()) else {
        // Unreachable for a validated inventory document.
        return Err(AppError::InternalServerError(
            "selected flight has no legs".to_string(),
        ));
    };

    let response = SelectFlightResponse {
        selection_id: selection.id,
        from: first.departure_airport.code.clone(),
        to: last.arrival_airport.code.clone(),
        departure: first.departure_airport.time.clone(),
        arrival: last.arrival_airport.time.clone(),
        airlines: selection.selected_flight.other_details.airline.clone(),
        stops: selection.selected_flight.other_details.total_stops,
        price: selection.selected_fare.price.price_per_adult.clone(),
        brand_name: selection.selected_fare.fare_identifiers.brand_name.clone(),
    };

    Ok((StatusCode::CREATED, Json(ApiSuccess::new(response))))
}
