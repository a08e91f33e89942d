use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::schedule::{hhmm, ExistingReservation};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Reservation {
    pub id: String,
    pub tenant_id: String,
    pub item_id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub party_size: u32,
    pub customer_total: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewReservationParams {
    pub tenant_id: String,
    pub item_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub party_size: u32,
    pub customer_total: Decimal,
    pub currency: String,
}

impl Reservation {
    pub fn new(params: NewReservationParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            item_id: params.item_id,
            date: params.date,
            start_time: params.start_time,
            party_size: params.party_size,
            customer_total: params.customer_total,
            currency: params.currency,
            created_at: Utc::now(),
        }
    }

    pub fn as_existing(&self) -> ExistingReservation {
        ExistingReservation {
            date: self.date,
            start_time: self.start_time,
            party_size: self.party_size,
        }
    }
}
