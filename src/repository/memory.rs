use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::flight::{Flight, FlightSearchQuery};
use crate::models::flight_update::{FlightUpdate, NewFlightUpdate};
use crate::models::seat::Seat;
use crate::repository::BookingRepository;
use crate::utils::error::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    flights: HashMap<Uuid, Flight>,
    seats: Vec<Seat>,
    bookings: Vec<Booking>,
    updates: Vec<FlightUpdate>,
}

/// Table store kept in process memory. Enforces the same unique tracking
/// code constraint as the MySQL schema.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
    booking_failure: RwLock<Option<AppError>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_flight(&self, flight: Flight) {
        self.tables.write().await.flights.insert(flight.id, flight);
    }

    pub async fn insert_seats(&self, seats: impl IntoIterator<Item = Seat>) {
        self.tables.write().await.seats.extend(seats);
    }

    pub async fn bookings(&self) -> Vec<Booking> {
        self.tables.read().await.bookings.clone()
    }

    /// Makes every following `create_booking` fail with `error` until
    /// cleared with `None`.
    pub async fn fail_bookings_with(&self, error: Option<AppError>) {
        *self.booking_failure.write().await = error;
    }
}

#[async_trait]
impl BookingRepository for InMemoryRepository {
    async fn get_flight(&self, flight_id: Uuid) -> AppResult<Option<Flight>> {
        Ok(self.tables.read().await.flights.get(&flight_id).cloned())
    }

    async fn search_flights(&self, query: &FlightSearchQuery) -> AppResult<Vec<Flight>> {
        let tables = self.tables.read().await;
        let mut flights: Vec<Flight> = tables
            .flights
            .values()
            .filter(|flight| query.matches(flight))
            .cloned()
            .collect();
        flights.sort_by_key(|flight| flight.departure_time);
        Ok(flights)
    }

    async fn list_seats(&self, flight_id: Uuid) -> AppResult<Vec<Seat>> {
        let tables = self.tables.read().await;
        Ok(tables
            .seats
            .iter()
            .filter(|seat| seat.flight_id == flight_id)
            .cloned()
            .collect())
    }

    async fn create_booking(&self, booking: NewBooking) -> AppResult<Booking> {
        if let Some(error) = self.booking_failure.read().await.clone() {
            return Err(error);
        }

        let mut tables = self.tables.write().await;
        if tables
            .bookings
            .iter()
            .any(|existing| existing.tracking_code == booking.tracking_code)
        {
            return Err(AppError::Conflict(
                "Tracking code already in use. Please try again.".into(),
            ));
        }

        let stored = Booking {
            id: Uuid::new_v4(),
            user_id: booking.user_id,
            flight_id: booking.flight_id,
            tracking_code: booking.tracking_code,
            passenger_name: booking.passenger_name,
            passenger_email: booking.passenger_email,
            passenger_phone: booking.passenger_phone,
            seat_number: booking.seat_number,
            gate: Some(booking.gate),
            boarding_time: Some(booking.boarding_time),
            status: BookingStatus::Confirmed,
            total_price: booking.total_price,
            created_at: Utc::now(),
        };
        tables.bookings.push(stored.clone());
        Ok(stored)
    }

    async fn get_booking_by_code(&self, tracking_code: &str) -> AppResult<Option<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .iter()
            .find(|booking| booking.tracking_code == tracking_code)
            .cloned())
    }

    async fn list_recent_updates(&self, flight_id: Uuid, limit: usize) -> AppResult<Vec<FlightUpdate>> {
        let tables = self.tables.read().await;
        // Later inserts win ties on created_at
        let mut updates: Vec<FlightUpdate> = tables
            .updates
            .iter()
            .rev()
            .filter(|update| update.flight_id == flight_id)
            .cloned()
            .collect();
        updates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        updates.truncate(limit);
        Ok(updates)
    }

    async fn update_flight(&self, flight: &Flight) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        match tables.flights.get_mut(&flight.id) {
            Some(existing) => {
                *existing = flight.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("Flight not found".into())),
        }
    }

    async fn insert_flight_update(&self, update: NewFlightUpdate) -> AppResult<FlightUpdate> {
        let stored = FlightUpdate {
            id: Uuid::new_v4(),
            flight_id: update.flight_id,
            update_type: update.update_type,
            message: update.message,
            old_value: update.old_value,
            new_value: update.new_value,
            created_at: Utc::now(),
        };
        self.tables.write().await.updates.push(stored.clone());
        Ok(stored)
    }
}
