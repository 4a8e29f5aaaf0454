pub mod availability;
pub mod day_state;
pub mod listing_url;
pub mod property;
pub mod window;
