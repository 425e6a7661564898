use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::inventory::{Fare, InventoryDocument, Leg};

/// Flat, UI-ready projection of a raw flight option.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFlightOption {
    pub flight_id: String,
    pub sector_key: String,
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    /// Sum of all leg durations, minutes.
    pub total_duration: u32,
    pub stops: u32,
    pub airlines: Vec<String>,
    pub legs: Vec<Leg>,
    pub fares: Vec<Fare>,
    pub lowest_price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Opaque grouping token correlating a search execution.
    pub search_id: String,
    pub journeys: BTreeMap<String, Vec<NormalizedFlightOption>>,
}

/// Projects every journey's sector group into normalized flight options.
///
/// Options keep the raw document's enumeration order; price sorting is the
/// filter engine's job. A journey whose sector key has no matching sector
/// group is silently omitted, so partial datasets still search.
pub fn normalize(inventory: &InventoryDocument) -> SearchResult {
    let result = &inventory.data.result;
    let mut journeys = BTreeMap::new();

    for (journey_key, journey) in &result.journeys {
        let Some(sector_group) = result.sectors.get(&journey.sector) else {
            tracing::warn!(
                "Journey {} references unknown sector \"{}\", skipping",
                journey_key,
                journey.sector
            );
            continue;
        };

        let options = sector_group
            .iter()
            .map(|option| {
                let legs = &option.flights;
                // Validated at load time: every option has at least one leg.
                let first = legs.first();
                let last = legs.last();
                let total_duration = legs.iter().map(|leg| leg.duration_in_min).sum();

                NormalizedFlightOption {
                    flight_id: option.flight_id.clone(),
                    sector_key: journey.sector.clone(),
                    from: first.map(|l| l.departure_airport.code.clone()).unwrap_or_default(),
                    to: last.map(|l| l.arrival_airport.code.clone()).unwrap_or_default(),
                    departure: first.map(|l| l.departure_airport.time.clone()).unwrap_or_default(),
                    arrival: last.map(|l| l.arrival_airport.time.clone()).unwrap_or_default(),
                    total_duration,
                    stops: option.other_details.total_stops,
                    airlines: option.other_details.airline.clone(),
                    legs: legs.clone(),
                    fares: option.fares.clone(),
                    lowest_price: option.other_details.lowest_price.clone(),
                }
            })
            .collect();

        journeys.insert(journey_key.clone(), options);
    }

    SearchResult {
        search_id: inventory.data.search_id.clone(),
        journeys,
    }
}
