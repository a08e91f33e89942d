use std::sync::Arc;
use crate::domain::ports::{ItemRepository, ReservationRepository};
use crate::infra::change_feed::ChangeFeed;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub item_repo: Arc<dyn ItemRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub change_feed: ChangeFeed,
}
