pub mod booking_service;
pub mod flight_service;
pub mod operations_service;
pub mod status_service;
