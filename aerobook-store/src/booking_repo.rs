use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use aerobook_core::booking::{Booking, BookingStatus};
use aerobook_core::repository::BookingRepository;
use aerobook_core::{CoreError, CoreResult};

pub struct PostgresBookingRepository {
    pub pool: PgPool,
}

fn persistence(err: impl std::fmt::Display) -> CoreError {
    CoreError::PersistenceError(err.to_string())
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn create(&self, booking: &Booking) -> CoreResult<()> {
        let selected_flight = serde_json::to_value(&booking.selected_flight).map_err(persistence)?;
        let selected_fare = serde_json::to_value(&booking.selected_fare).map_err(persistence)?;
        let travellers = serde_json::to_value(&booking.travellers).map_err(persistence)?;
        let contact_info = serde_json::to_value(&booking.contact_info).map_err(persistence)?;

        sqlx::query(
            r#"
            INSERT INTO bookings (id, booking_id, selection_id, search_id, selected_flight,
                                  selected_fare, travellers, contact_info, status, total_price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(booking.id)
        .bind(&booking.booking_id)
        .bind(booking.selection_id)
        .bind(&booking.search_id)
        .bind(selected_flight)
        .bind(selected_fare)
        .bind(travellers)
        .bind(contact_info)
        .bind(booking.status.to_string())
        .bind(&booking.total_price)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Booking>> {
        let row = sqlx::query(
            r#"
            SELECT id, booking_id, selection_id, search_id, selected_flight,
                   selected_fare, travellers, contact_info, status, total_price, created_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let selected_flight: serde_json::Value = row.try_get("selected_flight").map_err(persistence)?;
        let selected_fare: serde_json::Value = row.try_get("selected_fare").map_err(persistence)?;
        let travellers: serde_json::Value = row.try_get("travellers").map_err(persistence)?;
        let contact_info: serde_json::Value = row.try_get("contact_info").map_err(persistence)?;
        let status: String = row.try_get("status").map_err(persistence)?;

        Ok(Some(Booking {
            id: row.try_get("id").map_err(persistence)?,
            booking_id: row.try_get("booking_id").map_err(persistence)?,
            selection_id: row.try_get("selection_id").map_err(persistence)?,
            search_id: row.try_get("search_id").map_err(persistence)?,
            selected_flight: serde_json::from_value(selected_flight).map_err(persistence)?,
            selected_fare: serde_json::from_value(selected_fare).map_err(persistence)?,
            travellers: serde_json::from_value(travellers).map_err(persistence)?,
            contact_info: serde_json::from_value(contact_info).map_err(persistence)?,
            status: status.parse().unwrap_or(BookingStatus::CONFIRMED),
            total_price: row.try_get("total_price").map_err(persistence)?,
            created_at: row.try_get("created_at").map_err(persistence)?,
        }))
    }
}
