use crate::domain::{models::reservation::Reservation, ports::{ReservationRepository, ReservedSlot}};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::debug;

/// Capacity ledger for committed reservations.
///
/// A single mutex covers the capacity check and the insert, which is what
/// makes `try_reserve` a decrement-if-positive.
#[derive(Default)]
pub struct MemoryReservationRepo {
    reservations: Mutex<Vec<Reservation>>,
}

impl MemoryReservationRepo {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepo {
    async fn list_by_date(&self, item_id: &str, date: NaiveDate) -> Result<Vec<Reservation>, AppError> {
        let reservations = self.reservations.lock().await;
        Ok(reservations.iter()
            .filter(|r| r.item_id == item_id && r.date == date)
            .cloned()
            .collect())
    }

    async fn list_by_item(&self, item_id: &str) -> Result<Vec<Reservation>, AppError> {
        let reservations = self.reservations.lock().await;
        let mut listed: Vec<_> = reservations.iter().filter(|r| r.item_id == item_id).cloned().collect();
        listed.sort_by_key(|r| (r.date, r.start_time));
        Ok(listed)
    }

    async fn try_reserve(&self, reservation: &Reservation, capacity: u32) -> Result<ReservedSlot, AppError> {
        let mut reservations = self.reservations.lock().await;

        let taken = reservations.iter()
            .filter(|r| r.item_id == reservation.item_id
                && r.date == reservation.date
                && r.start_time == reservation.start_time)
            .fold(0u32, |acc, r| acc.saturating_add(r.party_size));

        let left = capacity.saturating_sub(taken);
        if left < reservation.party_size {
            debug!(item_id = %reservation.item_id, left, requested = reservation.party_size, "capacity check lost");
            return Err(AppError::Conflict("Selected time slot is no longer available".into()));
        }

        reservations.push(reservation.clone());
        Ok(ReservedSlot {
            reservation: reservation.clone(),
            spots_remaining: left - reservation.party_size,
        })
    }
}
