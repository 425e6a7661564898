use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::Booking;
use crate::selection::Selection;
use crate::CoreResult;

/// Repository trait for selection records. Create/find-by-id is the whole
/// contract; selections are never updated or deleted.
#[async_trait]
pub trait SelectionRepository: Send + Sync {
    async fn create(&self, selection: &Selection) -> CoreResult<()>;

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Selection>>;
}

/// Repository trait for booking records.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> CoreResult<()>;

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Booking>>;
}
