use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::error::EngineError;
use crate::domain::models::fee::{GiftCard, PriceBreakdown, PromoCode};
use crate::domain::models::item::BookableItem;
use crate::domain::models::schedule::{hhmm, ExistingReservation};
use crate::domain::services::availability::generate_time_slots;
use crate::domain::services::fees::compute_breakdown;

#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: u32,
    pub promo: Option<PromoCode>,
    pub gift_card: Option<GiftCard>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Quote {
    pub item_id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub party_size: u32,
    pub spots_remaining: u32,
    pub breakdown: PriceBreakdown,
}

/// Checks a (date, time, party) choice against live availability and prices it.
///
/// The result is only as fresh as `reservations`; committing still needs an
/// atomic capacity check.
pub fn assemble_quote(
    item: &BookableItem,
    reservations: &[ExistingReservation],
    now: NaiveDateTime,
    request: &QuoteRequest,
) -> Result<Quote, EngineError> {
    if request.party_size == 0 {
        return Err(EngineError::input("party_size must be at least 1"));
    }

    let slots = generate_time_slots(request.date, &item.schedule, &item.blocked_dates, reservations, now)?;
    let slot = slots
        .iter()
        .find(|s| s.time == request.time)
        .ok_or_else(|| {
            EngineError::unavailable(format!(
                "{} {} is not a bookable slot",
                request.date,
                request.time.format("%H:%M")
            ))
        })?;

    if slot.spots < request.party_size {
        return Err(EngineError::unavailable(format!(
            "only {} spots left at {} {}",
            slot.spots,
            request.date,
            request.time.format("%H:%M")
        )));
    }

    let subtotal = item.unit_price * Decimal::from(request.party_size);
    let breakdown = compute_breakdown(subtotal, &item.fees, request.promo.as_ref(), request.gift_card.as_ref())?;

    Ok(Quote {
        item_id: item.id.clone(),
        date: request.date,
        time: request.time,
        party_size: request.party_size,
        spots_remaining: slot.spots - request.party_size,
        breakdown,
    })
}
