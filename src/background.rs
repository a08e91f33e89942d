use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn, info_span, Instrument};
use crate::state::AppState;
use crate::infra::change_feed::AvailabilityChange;

/// Follows the change feed for the lifetime of the server and records every
/// availability change. Returns once the feed is closed.
pub async fn start_change_listener(state: Arc<AppState>) {
    info!("Starting availability change listener...");
    let mut rx = state.change_feed.subscribe();

    loop {
        match rx.recv().await {
            Ok(change) => {
                let span = info_span!("availability_change", slug = %change.slug());
                async { record_change(&change) }.instrument(span).await;
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Change listener lagged behind, skipped {} changes", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Change feed closed, stopping listener");
                break;
            }
        }
    }
}

fn record_change(change: &AvailabilityChange) {
    match change {
        AvailabilityChange::ItemUpdated { tenant_id, .. } => {
            info!(tenant_id = %tenant_id, "Item schedule or fees updated");
        }
        AvailabilityChange::ItemDeleted { tenant_id, .. } => {
            info!(tenant_id = %tenant_id, "Item removed");
        }
        AvailabilityChange::BlockedDatesChanged { tenant_id, .. } => {
            info!(tenant_id = %tenant_id, "Blocked dates replaced");
        }
        AvailabilityChange::ReservationCommitted { tenant_id, date, time, spots_remaining, .. } => {
            info!(
                tenant_id = %tenant_id,
                date = %date,
                time = %time.format("%H:%M"),
                spots_remaining,
                "Reservation committed"
            );
            if *spots_remaining == 0 {
                info!("Slot {} {} is now full", date, time.format("%H:%M"));
            }
        }
    }
}
