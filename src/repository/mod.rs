use async_trait::async_trait;
use uuid::Uuid;

use crate::models::booking::{Booking, NewBooking};
use crate::models::flight::{Flight, FlightSearchQuery};
use crate::models::flight_update::{FlightUpdate, NewFlightUpdate};
use crate::models::seat::Seat;
use crate::utils::error::AppResult;

pub mod memory;
pub mod mysql;
pub mod seed;

/// Number of update-log rows loaded when a status view opens.
pub const RECENT_UPDATES_LIMIT: usize = 10;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get_flight(&self, flight_id: Uuid) -> AppResult<Option<Flight>>;

    /// Flights matching the query, earliest departure first.
    async fn search_flights(&self, query: &FlightSearchQuery) -> AppResult<Vec<Flight>>;

    /// Every seat of the flight, in no particular order.
    async fn list_seats(&self, flight_id: Uuid) -> AppResult<Vec<Seat>>;

    /// Inserts the booking as one row. A duplicate tracking code is a
    /// `Conflict`; nothing is stored in that case.
    async fn create_booking(&self, booking: NewBooking) -> AppResult<Booking>;

    /// Exact match on an already normalized tracking code.
    async fn get_booking_by_code(&self, tracking_code: &str) -> AppResult<Option<Booking>>;

    /// Newest first, at most `limit` rows.
    async fn list_recent_updates(&self, flight_id: Uuid, limit: usize) -> AppResult<Vec<FlightUpdate>>;

    async fn update_flight(&self, flight: &Flight) -> AppResult<()>;

    async fn insert_flight_update(&self, update: NewFlightUpdate) -> AppResult<FlightUpdate>;
}
