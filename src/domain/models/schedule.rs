use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::error::EngineError;

fn unbounded_capacity() -> u32 {
    u32::MAX
}

/// When a bookable item can be reserved.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScheduleConfig {
    pub operating_days: HashSet<Weekday>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub slot_interval_minutes: u32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub advance_booking_minutes: u32,
    #[serde(default = "unbounded_capacity")]
    pub capacity_per_slot: u32,
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.end_time <= self.start_time {
            return Err(EngineError::config(format!(
                "end_time {} must be after start_time {}",
                self.end_time.format("%H:%M"),
                self.start_time.format("%H:%M")
            )));
        }
        if self.slot_interval_minutes == 0 {
            return Err(EngineError::config("slot_interval_minutes must be positive"));
        }
        if self.duration_minutes == 0 {
            return Err(EngineError::config("duration_minutes must be positive"));
        }
        if self.capacity_per_slot == 0 {
            return Err(EngineError::config("capacity_per_slot must be positive"));
        }
        Ok(())
    }

    pub fn window_start_secs(&self) -> u64 {
        u64::from(self.start_time.num_seconds_from_midnight())
    }

    pub fn window_end_secs(&self) -> u64 {
        u64::from(self.end_time.num_seconds_from_midnight())
    }
}

/// Admin override removing a day, or an inclusive run of days, from availability.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum BlockedDate {
    Day(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

impl BlockedDate {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            BlockedDate::Day(day) => day == date,
            BlockedDate::Range { start, end } => start <= date && date <= end,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        match *self {
            BlockedDate::Range { start, end } if start > end => Err(EngineError::config(format!(
                "blocked range starts {} after it ends {}",
                start, end
            ))),
            _ => Ok(()),
        }
    }
}

/// A committed booking, as seen by the capacity arithmetic.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ExistingReservation {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub party_size: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub available: bool,
    pub spots: u32,
}

/// Times of day travel as "HH:MM"; seconds are accepted on input.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {raw}")))
    }
}
