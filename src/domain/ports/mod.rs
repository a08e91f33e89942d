use crate::domain::models::{item::BookableItem, reservation::Reservation, schedule::BlockedDate};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn upsert(&self, item: &BookableItem) -> Result<BookableItem, AppError>;
    async fn find_by_slug(&self, tenant_id: &str, slug: &str) -> Result<Option<BookableItem>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<BookableItem>, AppError>;
    async fn replace_blocked_dates(&self, tenant_id: &str, slug: &str, blocked: Vec<BlockedDate>) -> Result<BookableItem, AppError>;
    async fn delete(&self, tenant_id: &str, slug: &str) -> Result<(), AppError>;
}

/// A committed reservation and the spots its slot had left at commit time.
#[derive(Debug, Clone)]
pub struct ReservedSlot {
    pub reservation: Reservation,
    pub spots_remaining: u32,
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn list_by_date(&self, item_id: &str, date: NaiveDate) -> Result<Vec<Reservation>, AppError>;
    async fn list_by_item(&self, item_id: &str) -> Result<Vec<Reservation>, AppError>;
    /// Commits `reservation` only if its slot still holds `party_size` spots
    /// out of `capacity`. The check and the insert are one atomic step; a
    /// losing racer gets `AppError::Conflict`.
    async fn try_reserve(&self, reservation: &Reservation, capacity: u32) -> Result<ReservedSlot, AppError>;
}
