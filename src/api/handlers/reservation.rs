use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::TenantId;
use crate::api::dtos::requests::BookingChoiceRequest;
use crate::api::dtos::responses::ReservationCreatedResponse;
use crate::api::handlers::{load_item, quote::quote_choice};
use crate::domain::models::reservation::{NewReservationParams, Reservation};
use crate::domain::ports::ReservedSlot;
use crate::domain::services::quote::Quote;
use crate::error::AppError;
use crate::infra::change_feed::AvailabilityChange;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Json(payload): Json<BookingChoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_reservation: Starting for item {}", slug);

    let item = load_item(&state, &tenant_id, &slug).await?;

    // Re-run the availability predicate at commit time; the widget's view may be stale.
    let quote = quote_choice(&state, &item, payload).await?;

    let reservation = Reservation::new(NewReservationParams {
        tenant_id: tenant_id.clone(),
        item_id: item.id.clone(),
        date: quote.date,
        start_time: quote.time,
        party_size: quote.party_size,
        customer_total: quote.breakdown.customer_total,
        currency: quote.breakdown.currency.clone(),
    });

    let ReservedSlot { reservation: created, spots_remaining } = match state.reservation_repo
        .try_reserve(&reservation, item.schedule.capacity_per_slot)
        .await
    {
        Ok(created) => created,
        Err(e) => {
            warn!("Reservation rejected at commit for {} {} {}: {}", slug, quote.date, quote.time.format("%H:%M"), e);
            return Err(e);
        }
    };

    state.change_feed.publish(AvailabilityChange::ReservationCommitted {
        tenant_id,
        slug: slug.clone(),
        date: created.date,
        time: created.start_time,
        spots_remaining,
    });

    info!("Reservation confirmed: {} for item {}", created.id, slug);
    Ok((StatusCode::CREATED, Json(ReservationCreatedResponse {
        reservation: created,
        quote: Quote { spots_remaining, ..quote },
    })))
}

pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let item = load_item(&state, &tenant_id, &slug).await?;
    let reservations = state.reservation_repo.list_by_item(&item.id).await?;
    Ok(Json(reservations))
}
