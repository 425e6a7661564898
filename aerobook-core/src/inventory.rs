use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{CoreError, CoreResult};

/// The raw inventory document as shipped in the static dataset.
///
/// Parsed and validated once at process start, then shared read-only with
/// every service that needs it. Sector groups are ordered sequences: the
/// document's enumeration order is the order search results are returned in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryDocument {
    pub data: InventoryData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryData {
    pub search_id: String,
    pub result: InventoryResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryResult {
    pub journeys: BTreeMap<String, Journey>,
    pub sectors: BTreeMap<String, Vec<RawFlightOption>>,
}

/// One directional leg of a trip ("J1" outbound, "J2" return), pointing at
/// the sector group holding its flight options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journey {
    pub sector: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFlightOption {
    pub flight_id: String,
    /// Physical flight segments, in itinerary order.
    pub flights: Vec<Leg>,
    pub other_details: OtherDetails,
    pub fares: Vec<Fare>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub sequence: u32,
    pub flight_id: String,
    pub flt_no: String,
    pub airline_code: String,
    pub departure_airport: AirportStop,
    pub arrival_airport: AirportStop,
    pub duration_in_min: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportStop {
    pub code: String,
    pub time: String,
    pub terminal: Terminal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminal {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherDetails {
    /// Carrier codes across legs, in itinerary order.
    pub airline: Vec<String>,
    pub total_stops: u32,
    pub lowest_price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub fare_id: String,
    pub fare_group: String,
    pub price: FarePrice,
    pub refundable: bool,
    pub check_in_baggage_allowed: bool,
    pub fare_identifiers: FareIdentifiers,
    pub benefits: Vec<Benefit>,
}

/// Prices are decimal strings, not floats, to avoid rounding drift in the
/// stored records. They are only parsed for comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarePrice {
    /// Total for the itinerary. Absent in some legacy fares, in which case
    /// bookings fall back to "0".
    #[serde(rename = "CTC", default)]
    pub ctc: Option<String>,
    #[serde(rename = "pricePerAdult")]
    pub price_per_adult: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareIdentifiers {
    pub cabin_type: String,
    pub brand_name: String,
    pub available_seat_count: u32,
    pub rbd: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    pub benefit_type: String,
    pub value: String,
    pub description: String,
}

/// Parses a decimal price string for numeric comparison.
pub fn parse_price(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

impl Fare {
    pub fn per_adult_amount(&self) -> Option<f64> {
        parse_price(&self.price.price_per_adult)
    }
}

impl RawFlightOption {
    /// Cheapest per-adult fare amount across this option's fares.
    pub fn min_per_adult(&self) -> Option<f64> {
        self.fares
            .iter()
            .filter_map(Fare::per_adult_amount)
            .fold(None, |min, amount| match min {
                Some(m) if m <= amount => Some(m),
                _ => Some(amount),
            })
    }
}

impl InventoryDocument {
    pub fn search_id(&self) -> &str {
        &self.data.search_id
    }

    /// Re-resolves a journey/flight/fare combination against the
    /// authoritative raw document. Every step reports which identifier was
    /// missing so the transport layer can answer 404 precisely.
    pub fn resolve(
        &self,
        journey_key: &str,
        flight_id: &str,
        fare_id: &str,
    ) -> CoreResult<(&RawFlightOption, &Fare)> {
        let result = &self.data.result;

        let journey = result
            .journeys
            .get(journey_key)
            .ok_or_else(|| CoreError::NotFound(format!("Journey key \"{journey_key}\" not found")))?;

        let sector_group = result
            .sectors
            .get(&journey.sector)
            .ok_or_else(|| CoreError::NotFound(format!("Sector \"{}\" not found", journey.sector)))?;

        let flight = sector_group
            .iter()
            .find(|option| option.flight_id == flight_id)
            .ok_or_else(|| CoreError::NotFound(format!("Flight \"{flight_id}\" not found")))?;

        let fare = flight
            .fares
            .iter()
            .find(|fare| fare.fare_id == fare_id)
            .ok_or_else(|| CoreError::NotFound(format!("Fare \"{fare_id}\" not found")))?;

        Ok((flight, fare))
    }

    /// Structural validation, run once at load time so the normalizer and
    /// the selection service can rely on well-formed options.
    pub fn validate(&self) -> CoreResult<()> {
        for (sector_key, options) in &self.data.result.sectors {
            for option in options {
                if option.flights.is_empty() {
                    return Err(CoreError::DataUnavailable(format!(
                        "flight \"{}\" in sector \"{}\" has no legs",
                        option.flight_id, sector_key
                    )));
                }
                if option.fares.is_empty() {
                    return Err(CoreError::DataUnavailable(format!(
                        "flight \"{}\" in sector \"{}\" has no fares",
                        option.flight_id, sector_key
                    )));
                }
                let expected_stops = (option.flights.len() - 1) as u32;
                if option.other_details.total_stops != expected_stops {
                    return Err(CoreError::DataUnavailable(format!(
                        "flight \"{}\" declares {} stops but has {} legs",
                        option.flight_id,
                        option.other_details.total_stops,
                        option.flights.len()
                    )));
                }
                let declared = parse_price(&option.other_details.lowest_price);
                let cheapest = option.min_per_adult();
                match (declared, cheapest) {
                    (Some(d), Some(c)) if (d - c).abs() < 1e-6 => {}
                    _ => {
                        return Err(CoreError::DataUnavailable(format!(
                            "flight \"{}\" lowestPrice \"{}\" does not match its cheapest fare",
                            option.flight_id, option.other_details.lowest_price
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
