use crate::domain::models::fee::{FeeConfig, GiftCard, PromoCode};
use crate::domain::models::schedule::{BlockedDate, ScheduleConfig};
use rust_decimal::Decimal;
use serde::Deserialize;

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Deserialize)]
pub struct UpsertItemRequest {
    pub name: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub unit_price: Decimal,
    pub schedule: ScheduleConfig,
    pub fees: FeeConfig,
    pub blocked_dates: Option<Vec<BlockedDate>>,
}

#[derive(Deserialize)]
pub struct ReplaceBlockedDatesRequest {
    pub blocked_dates: Vec<BlockedDate>,
}

/// Body of both the quote and the reservation endpoints.
#[derive(Deserialize)]
pub struct BookingChoiceRequest {
    pub date: String,
    pub time: String,
    pub party_size: u32,
    pub promo: Option<PromoCode>,
    pub gift_card: Option<GiftCard>,
}
