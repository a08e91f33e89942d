pub mod memory_item_repo;
pub mod memory_reservation_repo;
