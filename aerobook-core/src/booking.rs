use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::inventory::{Fare, RawFlightOption};
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravellerType {
    ADT,
    CHD,
    INF,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
    U,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Traveller {
    #[serde(rename = "type")]
    pub traveller_type: TravellerType,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    #[serde(default)]
    pub passport_number: Option<String>,
    #[serde(default)]
    pub passport_expiry: Option<String>,
    pub nationality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    CONFIRMED,
    /// Reserved; no current flow produces it.
    CANCELLED,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::CONFIRMED => write!(f, "CONFIRMED"),
            BookingStatus::CANCELLED => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(BookingStatus::CONFIRMED),
            "CANCELLED" => Ok(BookingStatus::CANCELLED),
            _ => Err(()),
        }
    }
}

/// The final confirmation record, derived from a Selection plus traveller
/// and contact data. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    /// Human-readable id, `BK-<8-digit-timestamp-suffix>-<4-char-alnum>`.
    pub booking_id: String,
    pub selection_id: Uuid,
    pub search_id: String,
    pub selected_flight: RawFlightOption,
    pub selected_fare: Fare,
    pub travellers: Vec<Traveller>,
    pub contact_info: ContactInfo,
    pub status: BookingStatus,
    /// Itinerary total copied from the snapshotted fare, not per-adult.
    pub total_price: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_selection(
        selection: &Selection,
        travellers: Vec<Traveller>,
        contact_info: ContactInfo,
    ) -> Self {
        let total_price = selection
            .selected_fare
            .price
            .ctc
            .clone()
            .unwrap_or_else(|| "0".to_string());

        Self {
            id: Uuid::new_v4(),
            booking_id: generate_booking_id(),
            selection_id: selection.id,
            search_id: selection.search_id.clone(),
            selected_flight: selection.selected_flight.clone(),
            selected_fare: selection.selected_fare.clone(),
            travellers,
            contact_info,
            status: BookingStatus::CONFIRMED,
            total_price,
            created_at: Utc::now(),
        }
    }
}

const BOOKING_ID_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a short human-readable booking id, e.g. `BK-08729391-X4KP`.
pub fn generate_booking_id() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let start = millis.len().saturating_sub(8);
    let suffix = &millis[start..];

    let mut rng = rand::thread_rng();
    let random: String = (0..4)
        .map(|_| BOOKING_ID_CHARS[rng.gen_range(0..BOOKING_ID_CHARS.len())] as char)
        .collect();

    format!("BK-{suffix}-{random}")
}
