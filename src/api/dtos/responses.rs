use crate::domain::models::reservation::Reservation;
use crate::domain::models::schedule::Slot;
use crate::domain::services::quote::Quote;
use serde::Serialize;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<Slot>,
}

#[derive(Serialize)]
pub struct DatesResponse {
    pub year: i32,
    pub month: u32,
    pub dates: Vec<String>,
}

#[derive(Serialize)]
pub struct ReservationCreatedResponse {
    pub reservation: Reservation,
    pub quote: Quote,
}
