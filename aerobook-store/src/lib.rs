pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod inventory_loader;
pub mod memory;
pub mod selection_repo;

pub use booking_repo::PostgresBookingRepository;
pub use database::DbClient;
pub use memory::{InMemoryBookingRepository, InMemorySelectionRepository};
pub use selection_repo::PostgresSelectionRepository;
