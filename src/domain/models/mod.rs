pub mod fee;
pub mod item;
pub mod reservation;
pub mod schedule;
