use std::fs;
use std::path::Path;

use aerobook_core::inventory::InventoryDocument;
use aerobook_core::{CoreError, CoreResult};
use tracing::info;

/// Reads, parses and validates the static inventory fixture.
///
/// Called once at process start; the returned document is shared read-only
/// (`Arc`) with the services that need it for the process lifetime. There is
/// no invalidation: the dataset is a fixture, and a restart picks up changes.
pub fn load_inventory(path: impl AsRef<Path>) -> CoreResult<InventoryDocument> {
    let path = path.as_ref();

    let raw = fs::read_to_string(path).map_err(|e| {
        CoreError::DataUnavailable(format!("failed to read {}: {e}", path.display()))
    })?;

    let document: InventoryDocument = serde_json::from_str(&raw).map_err(|e| {
        CoreError::DataUnavailable(format!("failed to parse {}: {e}", path.display()))
    })?;

    document.validate()?;

    let result = &document.data.result;
    let option_count: usize = result.sectors.values().map(Vec::len).sum();
    info!(
        "Loaded flight inventory from {}: {} journeys, {} flight options",
        path.display(),
        result.journeys.len(),
        option_count
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_DOCUMENT: &str = r#"{
        "data": {
            "searchId": "DEL-DXB-1-20260302",
            "result": {
                "journeys": { "J1": { "sector": "DEL-DXB" } },
                "sectors": {
                    "DEL-DXB": [
                        {
                            "flightId": "FL-AI-0995",
                            "flights": [
                                {
                                    "sequence": 1,
                                    "flightId": "AI-0995",
                                    "fltNo": "0995",
                                    "airlineCode": "AI",
                                    "departureAirport": {
                                        "code": "DEL",
                                        "time": "2026-03-02T08:15:00",
                                        "terminal": { "name": "T3" }
                                    },
                                    "arrivalAirport": {
                                        "code": "DXB",
                                        "time": "2026-03-02T10:45:00",
                                        "terminal": { "name": "T1" }
                                    },
                                    "durationInMin": 210
                                }
                            ],
                            "otherDetails": {
                                "airline": ["AI"],
                                "totalStops": 0,
                                "lowestPrice": "5899.00"
                            },
                            "fares": [
                                {
                                    "fareId": "FARE-SAVER",
                                    "fareGroup": "SAVER",
                                    "price": { "CTC": "5899.00", "pricePerAdult": "5899.00" },
                                    "refundable": false,
                                    "checkInBaggageAllowed": true,
                                    "fareIdentifiers": {
                                        "cabinType": "ECONOMY",
                                        "brandName": "Saver",
                                        "availableSeatCount": 9,
                                        "rbd": "Q"
                                    },
                                    "benefits": []
                                }
                            ]
                        }
                    ]
                }
            }
        }
    }"#;

    #[test]
    fn test_load_valid_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID_DOCUMENT.as_bytes()).unwrap();

        let document = load_inventory(file.path()).unwrap();
        assert_eq!(document.search_id(), "DEL-DXB-1-20260302");
        assert_eq!(document.data.result.journeys.len(), 1);
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let err = load_inventory("no/such/flight.json").unwrap_err();
        assert!(matches!(err, CoreError::DataUnavailable(_)));
    }

    #[test]
    fn test_malformed_json_is_data_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_inventory(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::DataUnavailable(_)));
    }

    #[test]
    fn test_invalid_document_is_rejected() {
        // Valid JSON, but the option declares the wrong stop count.
        let tampered = VALID_DOCUMENT.replace("\"totalStops\": 0", "\"totalStops\": 3");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(tampered.as_bytes()).unwrap();

        let err = load_inventory(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::DataUnavailable(_)));
    }
}
