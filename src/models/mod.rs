pub mod booking;
pub mod flight;
pub mod flight_update;
pub mod seat;
