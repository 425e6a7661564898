use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use aerobook_core::booking::{Booking, ContactInfo, Traveller};
use aerobook_core::CoreError;

use crate::error::{ApiJson, AppError};
use crate::state::AppState;
use crate::ApiSuccess;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    selection_id: Option<String>,
    #[serde(default)]
    travellers: Vec<Traveller>,
    #[serde(default)]
    contact_info: Option<ContactInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    booking_id: String,
    status: String,
    from: String,
    to: String,
    departure: String,
    arrival: String,
    airlines: Vec<String>,
    stops: u32,
    total_price: String,
    travellers: Vec<Traveller>,
    contact_info: ContactInfo,
    created_at: DateTime<Utc>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/booking", post(create_booking))
}

/// POST /booking
///
/// Resolves the selection (the source of truth for flight and fare), derives
/// the total price from its snapshotted fare and persists a CONFIRMED
/// booking. Traveller count is deliberately not checked against the original
/// search; the demo flow books a single traveller.
async fn create_booking(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiSuccess<BookingConfirmation>>), AppError> {
    let contact_info = req
        .contact_info
        .filter(|c| !c.email.trim().is_empty() && !c.phone.trim().is_empty());
    let selection_id = req.selection_id.filter(|s| !s.trim().is_empty());
    let (Some(selection_id), Some(contact_info), false) =
        (selection_id, contact_info, req.travellers.is_empty())
    else {
        return Err(AppError::ValidationError(
            "selectionId, travellers, contactInfo (email + phone) are required".to_string(),
        ));
    };

    let selection_id = Uuid::parse_str(selection_id.trim())
        .map_err(|_| AppError::ValidationError("Invalid selectionId".to_string()))?;

    let selection = state
        .selections
        .find_by_id(selection_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound("Selection not found. Please select a flight first.".to_string())
        })?;

    let booking = Booking::from_selection(&selection, req.travellers, contact_info);
    state.bookings.create(&booking).await?;

    info!(
        "Booking {} created from selection {}",
        booking.booking_id, booking.selection_id
    );

    let legs = &booking.selected_flight.flights;
    let (Some(first), Some(last)) = (legs.first(), legs.last()) else {
        // Unreachable for snapshots taken from a validated inventory.
        return Err(AppError::InternalServerError(
            "booked flight has no legs".to_string(),
        ));
    };

    let confirmation = BookingConfirmation {
        booking_id: booking.booking_id.clone(),
        status: booking.status.to_string(),
        from: first.departure_airport.code.clone(),
        to: last.arrival_airport.code.clone(),
        departure: first.departure_airport.time.clone(),
        arrival: last.arrival_airport.time.clone(),
        airlines: booking.selected_flight.other_details.airline.clone(),
        stops: booking.selected_flight.other_details.total_stops,
        total_price: booking.total_price.clone(),
        travellers: booking.travellers.clone(),
        contact_info: booking.contact_info.clone(),
        created_at: booking.created_at,
    };

    Ok((StatusCode::CREATED, Json(ApiSuccess::new(confirmation))))
}
