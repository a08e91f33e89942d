use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::item::BookableItem;
use crate::domain::ports::ItemRepository;
use crate::error::AppError;
use crate::infra::change_feed::ChangeFeed;
use crate::infra::repositories::{
    memory_item_repo::MemoryItemRepo, memory_reservation_repo::MemoryReservationRepo,
};

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    info!("Initializing in-memory catalog and capacity ledger...");

    let item_repo = Arc::new(MemoryItemRepo::new());

    if let Some(path) = &config.catalog_path {
        let seeded = seed_catalog(item_repo.as_ref(), path).await?;
        info!("Seeded {} bookable items from {}", seeded, path);
    }

    Ok(AppState {
        config: config.clone(),
        item_repo,
        reservation_repo: Arc::new(MemoryReservationRepo::new()),
        change_feed: ChangeFeed::new(config.change_feed_capacity),
    })
}

async fn seed_catalog(repo: &dyn ItemRepository, path: &str) -> Result<usize, AppError> {
    let raw = tokio::fs::read_to_string(path).await
        .map_err(|e| AppError::InternalWithMsg(format!("Failed to read catalog {}: {}", path, e)))?;
    let items = parse_catalog(&raw)?;

    for item in &items {
        repo.upsert(item).await?;
    }
    Ok(items.len())
}

/// Every seeded item must pass the same checks as an admin upsert.
pub fn parse_catalog(raw: &str) -> Result<Vec<BookableItem>, AppError> {
    let items: Vec<BookableItem> = serde_json::from_str(raw)
        .map_err(|e| AppError::Validation(format!("Invalid catalog: {}", e)))?;

    for item in &items {
        item.validate()?;
    }
    Ok(items)
}
