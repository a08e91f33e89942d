use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::error::EngineError;
use crate::domain::models::schedule::{BlockedDate, ExistingReservation, ScheduleConfig, Slot};

pub fn is_day_operating(date: NaiveDate, config: &ScheduleConfig) -> bool {
    config.operating_days.contains(&date.weekday())
}

/// Day granularity. `date` must already be the venue-local calendar day.
pub fn is_date_blocked(date: NaiveDate, blocked_dates: &[BlockedDate]) -> bool {
    blocked_dates.iter().any(|b| b.contains(date))
}

/// The single bookability predicate, shared by calendar rendering and commit-time checks.
pub fn is_date_available(
    date: NaiveDate,
    config: &ScheduleConfig,
    blocked_dates: &[BlockedDate],
    now: NaiveDateTime,
) -> bool {
    date >= now.date() && !is_date_blocked(date, blocked_dates) && is_day_operating(date, config)
}

/// Available days of one calendar month, ascending.
///
/// The iterator is lazy and `Clone`, so a caller can walk the same month more
/// than once without re-resolving the inputs.
#[derive(Debug, Clone)]
pub struct AvailableDates<'a> {
    config: &'a ScheduleConfig,
    blocked_dates: &'a [BlockedDate],
    now: NaiveDateTime,
    month: u32,
    cursor: Option<NaiveDate>,
}

impl Iterator for AvailableDates<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while let Some(date) = self.cursor {
            if date.month() != self.month {
                self.cursor = None;
                break;
            }
            self.cursor = date.succ_opt();
            if is_date_available(date, self.config, self.blocked_dates, self.now) {
                return Some(date);
            }
        }
        None
    }
}

pub fn available_dates_for_month<'a>(
    year: i32,
    month: u32,
    config: &'a ScheduleConfig,
    blocked_dates: &'a [BlockedDate],
    now: NaiveDateTime,
) -> Result<AvailableDates<'a>, EngineError> {
    config.validate()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::input(format!("invalid month {year}-{month:02}")))?;

    Ok(AvailableDates {
        config,
        blocked_dates,
        now,
        month,
        cursor: Some(first),
    })
}

pub fn generate_time_slots(
    date: NaiveDate,
    config: &ScheduleConfig,
    blocked_dates: &[BlockedDate],
    existing_reservations: &[ExistingReservation],
    now: NaiveDateTime,
) -> Result<Vec<Slot>, EngineError> {
    config.validate()?;

    if !is_date_available(date, config, blocked_dates, now) {
        return Ok(Vec::new());
    }

    // Seconds in u64: minute counts of any u32 size cannot overflow.
    let window_end = config.window_end_secs();
    let duration = u64::from(config.duration_minutes) * 60;
    let interval = u64::from(config.slot_interval_minutes) * 60;
    let cutoff = now + Duration::minutes(i64::from(config.advance_booking_minutes));

    let mut slots = Vec::new();
    let mut cursor = config.window_start_secs();

    while cursor + duration <= window_end {
        let Some(time) = u32::try_from(cursor)
            .ok()
            .and_then(|secs| NaiveTime::from_num_seconds_from_midnight_opt(secs, 0))
        else {
            break;
        };
        cursor += interval;

        if date.and_time(time) < cutoff {
            continue;
        }

        let reserved: u32 = existing_reservations
            .iter()
            .filter(|r| r.date == date && r.start_time == time)
            .fold(0u32, |acc, r| acc.saturating_add(r.party_size));

        let spots = config.capacity_per_slot.saturating_sub(reserved);
        slots.push(Slot {
            time,
            available: spots > 0,
            spots,
        });
    }

    Ok(slots)
}
