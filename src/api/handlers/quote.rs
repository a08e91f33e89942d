use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::TenantId;
use crate::api::dtos::requests::BookingChoiceRequest;
use crate::api::handlers::{load_item, parse_date, parse_time};
use crate::domain::models::item::BookableItem;
use crate::domain::services::quote::{assemble_quote, Quote, QuoteRequest};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

/// Prices a choice against a fresh reservation snapshot.
pub(crate) async fn quote_choice(
    state: &AppState,
    item: &BookableItem,
    payload: BookingChoiceRequest,
) -> Result<Quote, AppError> {
    let tz = item.tz()?;
    let request = QuoteRequest {
        date: parse_date(&payload.date)?,
        time: parse_time(&payload.time, tz)?,
        party_size: payload.party_size,
        promo: payload.promo,
        gift_card: payload.gift_card,
    };

    let existing: Vec<_> = state.reservation_repo.list_by_date(&item.id, request.date).await?
        .iter()
        .map(|r| r.as_existing())
        .collect();

    let now = item.local_now(Utc::now())?;
    Ok(assemble_quote(item, &existing, now, &request)?)
}

pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Json(payload): Json<BookingChoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let item = load_item(&state, &tenant_id, &slug).await?;
    let quote = quote_choice(&state, &item, payload).await?;

    info!(
        "Quoted {} x{} on {} {}: {} {}",
        slug,
        quote.party_size,
        quote.date,
        quote.time.format("%H:%M"),
        quote.breakdown.customer_total,
        quote.breakdown.currency
    );
    Ok(Json(quote))
}
