use std::sync::Arc;

use aerobook_core::inventory::InventoryDocument;
use aerobook_core::repository::{BookingRepository, SelectionRepository};

#[derive(Clone)]
pub struct AppState {
    /// Authoritative raw inventory, loaded and validated once at startup.
    pub inventory: Arc<InventoryDocument>,
    pub selections: Arc<dyn SelectionRepository>,
    pub bookings: Arc<dyn BookingRepository>,
}
