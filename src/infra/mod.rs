pub mod change_feed;
pub mod factory;
pub mod repositories;
