use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::inventory::parse_price;
use crate::normalize::NormalizedFlightOption;

/// Stop-count constraint, using the wire values the search UI sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopsFilter {
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "0")]
    NonStop,
    #[serde(rename = "1")]
    OneStop,
    #[serde(rename = "2+")]
    TwoPlus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub stops: StopsFilter,
    pub max_price: f64,
    /// Inclusive local hour-of-day window for the departure timestamp.
    pub departure_time_start: u32,
    pub departure_time_end: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            stops: StopsFilter::Any,
            max_price: f64::MAX,
            departure_time_start: 0,
            departure_time_end: 23,
        }
    }
}

/// Applies all filter predicates and sorts the survivors by lowest fare,
/// ascending. Pure: recomputed from scratch on every filter change, which is
/// fine for result sets of tens of options.
pub fn filter_and_sort(
    options: &[NormalizedFlightOption],
    filters: &SearchFilters,
) -> Vec<NormalizedFlightOption> {
    let mut matched: Vec<NormalizedFlightOption> = options
        .iter()
        .filter(|option| matches_filters(option, filters))
        .cloned()
        .collect();

    // sort_by is stable, so equal prices keep their input order.
    matched.sort_by(|a, b| sort_price(a).total_cmp(&sort_price(b)));
    matched
}

fn matches_filters(option: &NormalizedFlightOption, filters: &SearchFilters) -> bool {
    let stops_ok = match filters.stops {
        StopsFilter::Any => true,
        StopsFilter::NonStop => option.stops == 0,
        StopsFilter::OneStop => option.stops == 1,
        StopsFilter::TwoPlus => option.stops >= 2,
    };
    if !stops_ok {
        return false;
    }

    // The cheapest fare decides inclusion, not the average or the one the
    // user might eventually pick.
    let cheapest = option
        .fares
        .iter()
        .filter_map(|fare| fare.per_adult_amount())
        .fold(f64::INFINITY, f64::min);
    if cheapest > filters.max_price {
        return false;
    }

    match departure_hour(&option.departure) {
        Some(hour) => {
            filters.departure_time_start <= hour && hour <= filters.departure_time_end
        }
        // An unparseable timestamp can't be placed in the window.
        None => false,
    }
}

fn sort_price(option: &NormalizedFlightOption) -> f64 {
    parse_price(&option.lowest_price).unwrap_or(f64::INFINITY)
}

fn departure_hour(timestamp: &str) -> Option<u32> {
    let trimmed = timestamp.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|dt| dt.hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Fare, FareIdentifiers, FarePrice};

    fn fare(per_adult: &str) -> Fare {
        Fare {
            fare_id: format!("F-{per_adult}"),
            fare_group: "SAVER".to_string(),
            price: FarePrice {
                ctc: Some(per_adult.to_string()),
                price_per_adult: per_adult.to_string(),
            },
            refundable: false,
            check_in_baggage_allowed: true,
            fare_identifiers: FareIdentifiers {
                cabin_type: "ECONOMY".to_string(),
                brand_name: "Saver".to_string(),
                available_seat_count: 5,
                rbd: "Q".to_string(),
            },
            benefits: Vec::new(),
        }
    }

    fn option(id: &str, stops: u32, departure: &str, fares: Vec<Fare>) -> NormalizedFlightOption {
        let lowest = fares
            .iter()
            .filter_map(Fare::per_adult_amount)
            .fold(f64::INFINITY, f64::min);
        NormalizedFlightOption {
            flight_id: id.to_string(),
            sector_key: "DEL-DXB".to_string(),
            from: "DEL".to_string(),
            to: "DXB".to_string(),
            departure: departure.to_string(),
            arrival: "2026-03-02T23:59:00".to_string(),
            total_duration: 210,
            stops,
            airlines: vec!["AI".to_string()],
            legs: Vec::new(),
            fares,
            lowest_price: format!("{lowest:.2}"),
        }
    }

    fn sample_options() -> Vec<NormalizedFlightOption> {
        vec![
            option("A", 0, "2026-03-02T08:15:00", vec![fare("5899.00"), fare("7499.00")]),
            option("B", 1, "2026-03-02T06:20:00", vec![fare("4999.00")]),
            option("C", 2, "2026-03-02T21:45:00", vec![fare("4599.00")]),
            option("D", 0, "2026-03-02T18:05:00", vec![fare("5899.00")]),
        ]
    }

    #[test]
    fn test_default_filters_keep_everything_sorted_by_price() {
        let sorted = filter_and_sort(&sample_options(), &SearchFilters::default());
        let ids: Vec<&str> = sorted.iter().map(|o| o.flight_id.as_str()).collect();
        assert_eq!(ids, vec!["C", "B", "A", "D"]);
    }

    #[test]
    fn test_stops_exact_match() {
        let filters = SearchFilters {
            stops: StopsFilter::NonStop,
            ..SearchFilters::default()
        };
        let sorted = filter_and_sort(&sample_options(), &filters);
        assert!(sorted.iter().all(|o| o.stops == 0));
        assert_eq!(sorted.len(), 2);
    }

    #[test]
    fn test_stops_two_plus_is_a_floor() {
        let mut options = sample_options();
        options.push(option("E", 3, "2026-03-02T10:00:00", vec![fare("9000.00")]));
        let filters = SearchFilters {
            stops: StopsFilter::TwoPlus,
            ..SearchFilters::default()
        };
        let sorted = filter_and_sort(&options, &filters);
        assert_eq!(sorted.len(), 2);
        assert!(sorted.iter().all(|o| o.stops >= 2));
    }

    #[test]
    fn test_max_price_uses_cheapest_fare() {
        // Option A's cheapest fare is 5899 even though it also sells a 7499
        // fare, so a 6000 cap keeps it.
        let filters = SearchFilters {
            max_price: 6000.0,
            ..SearchFilters::default()
        };
        let sorted = filter_and_sort(&sample_options(), &filters);
        assert!(sorted.iter().any(|o| o.flight_id == "A"));
        assert_eq!(sorted.len(), 4);

        let filters = SearchFilters {
            max_price: 5000.0,
            ..SearchFilters::default()
        };
        let sorted = filter_and_sort(&sample_options(), &filters);
        let ids: Vec<&str> = sorted.iter().map(|o| o.flight_id.as_str()).collect();
        assert_eq!(ids, vec!["C", "B"]);
    }

    #[test]
    fn test_departure_window_is_inclusive() {
        let filters = SearchFilters {
            departure_time_start: 6,
            departure_time_end: 8,
            ..SearchFilters::default()
        };
        let sorted = filter_and_sort(&sample_options(), &filters);
        let ids: Vec<&str> = sorted.iter().map(|o| o.flight_id.as_str()).collect();
        // B departs 06:20, A departs 08:15; both boundary hours count.
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_unparseable_departure_is_excluded() {
        let mut options = sample_options();
        options.push(option("X", 0, "not-a-timestamp", vec![fare("1.00")]));
        let sorted = filter_and_sort(&options, &SearchFilters::default());
        assert!(sorted.iter().all(|o| o.flight_id != "X"));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filters = SearchFilters {
            stops: StopsFilter::OneStop,
            max_price: 5000.0,
            departure_time_start: 5,
            departure_time_end: 12,
        };
        let once = filter_and_sort(&sample_options(), &filters);
        let twice = filter_and_sort(&once, &filters);
        let ids = |v: &[NormalizedFlightOption]| {
            v.iter().map(|o| o.flight_id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        // A and D share a lowest price; A appears first in the input.
        let sorted = filter_and_sort(&sample_options(), &SearchFilters::default());
        let a = sorted.iter().position(|o| o.flight_id == "A").unwrap();
        let d = sorted.iter().position(|o| o.flight_id == "D").unwrap();
        assert!(a < d);
    }
}
