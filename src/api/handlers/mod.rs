pub mod availability;
pub mod health;
pub mod item;
pub mod quote;
pub mod reservation;

use crate::domain::models::item::BookableItem;
use crate::domain::models::schedule::hhmm;
use crate::error::AppError;
use crate::state::AppState;
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

pub(crate) async fn load_item(state: &AppState, tenant_id: &str, slug: &str) -> Result<BookableItem, AppError> {
    state.item_repo.find_by_slug(tenant_id, slug).await?
        .ok_or(AppError::NotFound("Item not found".into()))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
}

/// Accepts venue-local "HH:MM" or an RFC 3339 instant, converted into the venue's zone.
pub(crate) fn parse_time(raw: &str, tz: Tz) -> Result<NaiveTime, AppError> {
    if raw.contains('T') {
        let dt = chrono::DateTime::parse_from_rfc3339(raw)
            .map_err(|_| AppError::Validation("Invalid ISO time format".into()))?;
        Ok(dt.with_timezone(&tz).time())
    } else {
        hhmm::parse(raw).ok_or(AppError::Validation("Invalid time format (HH:MM)".into()))
    }
}
