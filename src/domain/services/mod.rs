pub mod availability;
pub mod fees;
pub mod quote;
