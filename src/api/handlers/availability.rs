use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::TenantId;
use crate::api::dtos::responses::{DatesResponse, SlotsResponse};
use crate::api::handlers::{load_item, parse_date};
use crate::domain::services::availability::{available_dates_for_month, generate_time_slots};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{Datelike, Utc};
use tracing::debug;

pub async fn get_available_dates(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let item = load_item(&state, &tenant_id, &slug).await?;
    let now = item.local_now(Utc::now())?;

    let year = match params.get("year") {
        Some(raw) => raw.parse::<i32>().map_err(|_| AppError::Validation("Invalid year".into()))?,
        None => now.year(),
    };
    let month = match params.get("month") {
        Some(raw) => raw.parse::<u32>().map_err(|_| AppError::Validation("Invalid month".into()))?,
        None => now.month(),
    };

    let dates: Vec<String> = available_dates_for_month(year, month, &item.schedule, &item.blocked_dates, now)?
        .map(|d| d.to_string())
        .collect();

    debug!("{} available dates for {} in {}-{:02}", dates.len(), slug, year, month);
    Ok(Json(DatesResponse { year, month, dates }))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let item = load_item(&state, &tenant_id, &slug).await?;

    let date_str = params.get("date").ok_or(AppError::Validation("Date required".into()))?;
    let date = parse_date(date_str)?;
    let now = item.local_now(Utc::now())?;

    let existing: Vec<_> = state.reservation_repo.list_by_date(&item.id, date).await?
        .iter()
        .map(|r| r.as_existing())
        .collect();

    let slots = generate_time_slots(date, &item.schedule, &item.blocked_dates, &existing, now)?;

    Ok(Json(SlotsResponse {
        date: date.to_string(),
        slots,
    }))
}
