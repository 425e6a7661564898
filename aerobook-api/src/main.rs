use std::net::SocketAddr;
use std::sync::Arc;

use aerobook_api::{app, AppState};
use aerobook_core::repository::{BookingRepository, SelectionRepository};
use aerobook_store::{
    DbClient, InMemoryBookingRepository, InMemorySelectionRepository, PostgresBookingRepository,
    PostgresSelectionRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aerobook_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = aerobook_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Aerobook API on port {}", config.server.port);

    // The inventory is a fixture: load and validate it once, up front, and
    // refuse to start without it.
    let inventory = aerobook_store::inventory_loader::load_inventory(&config.inventory.path)
        .expect("Failed to load flight inventory");
    let inventory = Arc::new(inventory);

    let (selections, bookings): (Arc<dyn SelectionRepository>, Arc<dyn BookingRepository>) =
        match &config.database {
            Some(database) => {
                let db = DbClient::new(&database.url)
                    .await
                    .expect("Failed to connect to database");
                db.migrate().await.expect("Failed to run migrations");
                (
                    Arc::new(PostgresSelectionRepository {
                        pool: db.pool.clone(),
                    }),
                    Arc::new(PostgresBookingRepository { pool: db.pool }),
                )
            }
            None => {
                tracing::info!("No database configured, using in-memory stores");
                (
                    Arc::new(InMemorySelectionRepository::new()),
                    Arc::new(InMemoryBookingRepository::new()),
                )
            }
        };

    let app = app(AppState {
        inventory,
        selections,
        bookings,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
