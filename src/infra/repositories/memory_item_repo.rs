use crate::domain::{models::{item::BookableItem, schedule::BlockedDate}, ports::ItemRepository};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Items keyed by `(tenant_id, slug)`.
#[derive(Default)]
pub struct MemoryItemRepo {
    items: RwLock<HashMap<(String, String), BookableItem>>,
}

impl MemoryItemRepo {
    pub fn new() -> Self { Self::default() }
}

fn key(tenant_id: &str, slug: &str) -> (String, String) {
    (tenant_id.to_string(), slug.to_string())
}

#[async_trait]
impl ItemRepository for MemoryItemRepo {
    async fn upsert(&self, item: &BookableItem) -> Result<BookableItem, AppError> {
        let mut items = self.items.write().await;
        let stored = match items.get(&key(&item.tenant_id, &item.slug)) {
            // Keep identity stable so reservations stay attached to the item.
            Some(existing) => BookableItem {
                id: existing.id.clone(),
                created_at: existing.created_at,
                ..item.clone()
            },
            None => item.clone(),
        };
        items.insert(key(&stored.tenant_id, &stored.slug), stored.clone());
        Ok(stored)
    }

    async fn find_by_slug(&self, tenant_id: &str, slug: &str) -> Result<Option<BookableItem>, AppError> {
        Ok(self.items.read().await.get(&key(tenant_id, slug)).cloned())
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<BookableItem>, AppError> {
        let items = self.items.read().await;
        let mut listed: Vec<_> = items.values().filter(|i| i.tenant_id == tenant_id).cloned().collect();
        listed.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(listed)
    }

    async fn replace_blocked_dates(&self, tenant_id: &str, slug: &str, blocked: Vec<BlockedDate>) -> Result<BookableItem, AppError> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&key(tenant_id, slug))
            .ok_or(AppError::NotFound("Item not found".into()))?;
        item.blocked_dates = blocked;
        Ok(item.clone())
    }

    async fn delete(&self, tenant_id: &str, slug: &str) -> Result<(), AppError> {
        if self.items.write().await.remove(&key(tenant_id, slug)).is_none() {
            return Err(AppError::NotFound("Item not found".into()));
        }
        Ok(())
    }
}
