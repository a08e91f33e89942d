use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::TenantId;
use crate::api::dtos::requests::{UpsertItemRequest, ReplaceBlockedDatesRequest};
use crate::api::handlers::load_item;
use crate::domain::models::item::{BookableItem, NewItemParams};
use crate::error::AppError;
use crate::infra::change_feed::AvailabilityChange;
use std::sync::Arc;
use tracing::info;

pub async fn list_items(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
) -> Result<impl IntoResponse, AppError> {
    let items = state.item_repo.list_by_tenant(&tenant_id).await?;
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let item = load_item(&state, &tenant_id, &slug).await?;
    Ok(Json(item))
}

pub async fn upsert_item(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Json(payload): Json<UpsertItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let item = BookableItem::new(NewItemParams {
        tenant_id: tenant_id.clone(),
        slug: slug.clone(),
        name: payload.name,
        timezone: payload.timezone,
        unit_price: payload.unit_price,
        schedule: payload.schedule,
        fees: payload.fees,
        blocked_dates: payload.blocked_dates.unwrap_or_default(),
    });

    // Reject broken configs here rather than at quote time.
    item.validate()?;

    let saved = state.item_repo.upsert(&item).await?;
    state.change_feed.publish(AvailabilityChange::ItemUpdated { tenant_id, slug: slug.clone() });

    info!("Upserted item {} ({})", slug, saved.id);
    Ok(Json(saved))
}

pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.item_repo.delete(&tenant_id, &slug).await?;
    state.change_feed.publish(AvailabilityChange::ItemDeleted { tenant_id, slug: slug.clone() });

    info!("Deleted item {}", slug);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn get_blocked_dates(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let item = load_item(&state, &tenant_id, &slug).await?;
    Ok(Json(item.blocked_dates))
}

pub async fn replace_blocked_dates(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Json(payload): Json<ReplaceBlockedDatesRequest>,
) -> Result<impl IntoResponse, AppError> {
    for blocked in &payload.blocked_dates {
        blocked.validate()?;
    }

    let count = payload.blocked_dates.len();
    let item = state.item_repo.replace_blocked_dates(&tenant_id, &slug, payload.blocked_dates).await?;
    state.change_feed.publish(AvailabilityChange::BlockedDatesChanged { tenant_id, slug: slug.clone() });

    info!("Replaced blocked dates for item {} ({} entries)", slug, count);
    Ok(Json(item.blocked_dates))
}
