use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::inventory::{Fare, RawFlightOption};

/// A persisted record of which flight+fare a user chose.
///
/// Write-once and disposable: repeated selection of the same flight+fare
/// produces distinct records, and nothing ever updates or expires one. The
/// flight and fare are snapshotted by value so a later inventory change
/// cannot alter what was chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub id: Uuid,
    pub search_id: String,
    pub journey_key: String,
    pub selected_flight: RawFlightOption,
    pub selected_fare: Fare,
    pub created_at: DateTime<Utc>,
}

impl Selection {
    pub fn new(
        search_id: String,
        journey_key: String,
        flight: &RawFlightOption,
        fare: &Fare,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            search_id,
            journey_key,
            selected_flight: flight.clone(),
            selected_fare: fare.clone(),
            created_at: Utc::now(),
        }
    }
}
