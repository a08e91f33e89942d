use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::models::schedule::hhmm;

/// Something that changes what a booking widget should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AvailabilityChange {
    ItemUpdated { tenant_id: String, slug: String },
    ItemDeleted { tenant_id: String, slug: String },
    BlockedDatesChanged { tenant_id: String, slug: String },
    ReservationCommitted {
        tenant_id: String,
        slug: String,
        date: NaiveDate,
        #[serde(with = "hhmm")]
        time: NaiveTime,
        spots_remaining: u32,
    },
}

impl AvailabilityChange {
    pub fn slug(&self) -> &str {
        match self {
            AvailabilityChange::ItemUpdated { slug, .. }
            | AvailabilityChange::ItemDeleted { slug, .. }
            | AvailabilityChange::BlockedDatesChanged { slug, .. }
            | AvailabilityChange::ReservationCommitted { slug, .. } => slug,
        }
    }
}

/// Fan-out of availability changes to every mounted widget session.
///
/// Each subscriber gets its own receiver; a slow subscriber lags on its own
/// without blocking publishers.
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<AvailabilityChange>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, change: AvailabilityChange) {
        // No subscribers is fine.
        if let Err(broadcast::error::SendError(change)) = self.sender.send(change) {
            debug!("No subscribers for change on {}", change.slug());
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AvailabilityChange> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
