use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::EngineError;
use crate::domain::models::fee::FeeConfig;
use crate::domain::models::schedule::{BlockedDate, ScheduleConfig};

/// Something a tenant sells by the slot: a room, a lane, a guided session.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BookableItem {
    pub id: String,
    pub tenant_id: String,
    pub slug: String,
    pub name: String,
    pub timezone: String,
    pub unit_price: Decimal,
    pub schedule: ScheduleConfig,
    pub fees: FeeConfig,
    #[serde(default)]
    pub blocked_dates: Vec<BlockedDate>,
    pub created_at: DateTime<Utc>,
}

pub struct NewItemParams {
    pub tenant_id: String,
    pub slug: String,
    pub name: String,
    pub timezone: String,
    pub unit_price: Decimal,
    pub schedule: ScheduleConfig,
    pub fees: FeeConfig,
    pub blocked_dates: Vec<BlockedDate>,
}

impl BookableItem {
    pub fn new(params: NewItemParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            slug: params.slug,
            name: params.name,
            timezone: params.timezone,
            unit_price: params.unit_price,
            schedule: params.schedule,
            fees: params.fees,
            blocked_dates: params.blocked_dates,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.schedule.validate()?;
        self.fees.validate()?;
        for blocked in &self.blocked_dates {
            blocked.validate()?;
        }
        self.tz()?;
        if self.unit_price < Decimal::ZERO {
            return Err(EngineError::config("unit_price must not be negative"));
        }
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz, EngineError> {
        self.timezone
            .parse()
            .map_err(|_| EngineError::config(format!("unknown timezone {}", self.timezone)))
    }

    /// The venue's wall-clock time for a UTC instant.
    pub fn local_now(&self, now: DateTime<Utc>) -> Result<NaiveDateTime, EngineError> {
        Ok(now.with_timezone(&self.tz()?).naive_local())
    }
}
