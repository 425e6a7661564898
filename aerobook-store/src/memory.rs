use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use aerobook_core::booking::Booking;
use aerobook_core::repository::{BookingRepository, SelectionRepository};
use aerobook_core::selection::Selection;
use aerobook_core::CoreResult;

/// In-memory stores used when no database is configured, and as the test
/// doubles for the api tests. Records live for the process lifetime only,
/// which matches the disposable nature of selections in this demo.
#[derive(Default)]
pub struct InMemorySelectionRepository {
    records: RwLock<HashMap<Uuid, Selection>>,
}

impl InMemorySelectionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SelectionRepository for InMemorySelectionRepository {
    async fn create(&self, selection: &Selection) -> CoreResult<()> {
        self.records
            .write()
            .await
            .insert(selection.id, selection.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Selection>> {
        Ok(self.records.read().await.get(&id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryBookingRepository {
    records: RwLock<HashMap<Uuid, Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: &Booking) -> CoreResult<()> {
        self.records.write().await.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Booking>> {
        Ok(self.records.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerobook_core::inventory::{
        AirportStop, Fare, FareIdentifiers, FarePrice, Leg, OtherDetails, RawFlightOption,
        Terminal,
    };

    fn sample_flight() -> RawFlightOption {
        RawFlightOption {
            flight_id: "FL-AI-0995".to_string(),
            flights: vec![Leg {
                sequence: 1,
                flight_id: "AI-0995".to_string(),
                flt_no: "0995".to_string(),
                airline_code: "AI".to_string(),
                departure_airport: AirportStop {
                    code: "DEL".to_string(),
                    time: "2026-03-02T08:15:00".to_string(),
                    terminal: Terminal {
                        name: "T3".to_string(),
                    },
                },
                arrival_airport: AirportStop {
                    code: "DXB".to_string(),
                    time: "2026-03-02T10:45:00".to_string(),
                    terminal: Terminal {
                        name: "T1".to_string(),
                    },
                },
                duration_in_min: 210,
            }],
            other_details: OtherDetails {
                airline: vec!["AI".to_string()],
                total_stops: 0,
                lowest_price: "5899.00".to_string(),
            },
            fares: vec![sample_fare()],
        }
    }

    fn sample_fare() -> Fare {
        Fare {
            fare_id: "FARE-SAVER".to_string(),
            fare_group: "SAVER".to_string(),
            price: FarePrice {
                ctc: Some("5899.00".to_string()),
                price_per_adult: "5899.00".to_string(),
            },
            refundable: false,
            check_in_baggage_allowed: true,
            fare_identifiers: FareIdentifiers {
                cabin_type: "ECONOMY".to_string(),
                brand_name: "Saver".to_string(),
                available_seat_count: 9,
                rbd: "Q".to_string(),
            },
            benefits: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_selection_round_trip() {
        let repo = InMemorySelectionRepository::new();
        let flight = sample_flight();
        let selection = Selection::new(
            "DEL-DXB-1-20260302".to_string(),
            "J1".to_string(),
            &flight,
            &flight.fares[0],
        );

        repo.create(&selection).await.unwrap();
        let found = repo.find_by_id(selection.id).await.unwrap().unwrap();
        assert_eq!(found.selected_fare.fare_id, "FARE-SAVER");
        assert_eq!(found.journey_key, "J1");
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let repo = InMemorySelectionRepository::new();
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_repeated_selections_are_distinct_records() {
        let repo = InMemorySelectionRepository::new();
        let flight = sample_flight();
        let first = Selection::new("S1".to_string(), "J1".to_string(), &flight, &flight.fares[0]);
        let second = Selection::new("S1".to_string(), "J1".to_string(), &flight, &flight.fares[0]);

        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(repo.find_by_id(first.id).await.unwrap().is_some());
        assert!(repo.find_by_id(second.id).await.unwrap().is_some());
    }
}
