#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use skywings_booking::models::booking::{BookingRequest, PassengerDetails};
use skywings_booking::models::flight::{Flight, FlightStatus};
use skywings_booking::realtime::ChangeFeed;
use skywings_booking::repository::memory::InMemoryRepository;
use skywings_booking::repository::seed::generate_seat_map;
use skywings_booking::AppState;
use uuid::Uuid;

pub const TEST_ROWS: u32 = 20;

// Base fare 500.00, departing 2026-03-01 10:00 UTC, 3h 30m block time
pub fn test_flight(flight_number: &str, origin_code: &str, destination_code: &str) -> Flight {
    let departure_time = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
    Flight {
        id: Uuid::new_v4(),
        airline: "SkyWings".to_string(),
        flight_number: flight_number.to_string(),
        origin: format!("{} City", origin_code),
        origin_code: origin_code.to_string(),
        destination: format!("{} City", destination_code),
        destination_code: destination_code.to_string(),
        departure_time,
        arrival_time: departure_time + Duration::minutes(210),
        price: Decimal::new(50000, 2),
        available_seats: 119,
        aircraft_type: "Airbus A320".to_string(),
        status: FlightStatus::Scheduled,
        gate: Some("B22".to_string()),
        delay_minutes: None,
    }
}

/// Stores `flight` with a full seat map in which only 1A is taken.
pub async fn add_flight(repository: &InMemoryRepository, flight: Flight) -> Flight {
    let seats = generate_seat_map(flight.id, TEST_ROWS, |row, column| row == 1 && column == 'A');
    repository.insert_seats(seats).await;
    repository.insert_flight(flight.clone()).await;
    flight
}

pub fn passenger() -> PassengerDetails {
    PassengerDetails {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: Some("+44 20 7946 0000".to_string()),
        passport: "X1234567".to_string(),
    }
}

pub fn booking_request(flight: &Flight, seat_number: &str) -> BookingRequest {
    BookingRequest {
        flight_id: flight.id,
        seat_number: seat_number.to_string(),
        passenger: passenger(),
    }
}

/// Fresh store and feed wired into every service.
pub fn test_state(repository: Arc<InMemoryRepository>, jwt_secret: Option<&str>) -> (AppState, ChangeFeed) {
    let feed = ChangeFeed::new(16);
    let state = AppState::new(
        repository,
        feed.clone(),
        skywings_booking::config::AuthConfig {
            jwt_secret: jwt_secret.map(str::to_string),
        },
    );
    (state, feed)
}
