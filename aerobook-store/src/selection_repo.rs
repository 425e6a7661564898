use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use aerobook_core::repository::SelectionRepository;
use aerobook_core::selection::Selection;
use aerobook_core::{CoreError, CoreResult};

pub struct PostgresSelectionRepository {
    pub pool: PgPool,
}

fn persistence(err: impl std::fmt::Display) -> CoreError {
    CoreError::PersistenceError(err.to_string())
}

#[async_trait]
impl SelectionRepository for PostgresSelectionRepository {
    async fn create(&self, selection: &Selection) -> CoreResult<()> {
        let selected_flight =
            serde_json::to_value(&selection.selected_flight).map_err(persistence)?;
        let selected_fare = serde_json::to_value(&selection.selected_fare).map_err(persistence)?;

        sqlx::query(
            r#"
            INSERT INTO selections (id, search_id, journey_key, selected_flight, selected_fare, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(selection.id)
        .bind(&selection.search_id)
        .bind(&selection.journey_key)
        .bind(selected_flight)
        .bind(selected_fare)
        .bind(selection.created_at)
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Selection>> {
        let row = sqlx::query(
            r#"
            SELECT id, search_id, journey_key, selected_flight, selected_fare, created_at
            FROM selections
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

        Ok(Some(Selection {
            id: row.try_get("id").map_err(persistence)?,
            search_id: row.try_get("search_id").map_err(persistence)?,
            journey_key: row.try_get("journey_key").map_err(persistence)?,
            selected_flight: serde_json::from_value(selected_flight).map_err(persistence)?,
            selected_fare: serde_json::from_value(selected_fare).map_err(persistence)?,
            created_at: row.try_get("created_at").map_err(persistence)?,
        }))
    }
}
