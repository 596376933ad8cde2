use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::flight::{Flight, FlightSearchQuery, FlightStatus};
use crate::models::seat::{Seat, SeatClass};
use crate::repository::memory::InMemoryRepository;
use crate::repository::mysql::MySqlRepository;
use crate::repository::BookingRepository;
use crate::utils::error::AppResult;
use crate::seat_map::{band_for_row, EXIT_ROW, SEAT_COLUMNS};

pub const DEMO_ROWS: u32 = 20;

pub fn price_modifier_for(class: SeatClass) -> Decimal {
    match class {
        SeatClass::First => Decimal::new(25, 1),
        SeatClass::Business => Decimal::new(15, 1),
        SeatClass::Economy => Decimal::ONE,
    }
}

/// Builds a full A–F seat map for `rows` rows using the cabin layout
/// conventions: class by row band, windows on A/F, aisles on C/D and the
/// exit row at row 12. `occupied` decides which seats are already taken.
pub fn generate_seat_map(flight_id: Uuid, rows: u32, occupied: impl Fn(u32, char) -> bool) -> Vec<Seat> {
    let mut seats = Vec::with_capacity(rows as usize * SEAT_COLUMNS.len());
    for row in 1..=rows {
        let seat_class = band_for_row(row);
        for column in SEAT_COLUMNS {
            seats.push(Seat {
                id: Uuid::new_v4(),
                flight_id,
                seat_number: format!("{}{}", row, column),
                seat_class,
                is_available: !occupied(row, column),
                price_modifier: price_modifier_for(seat_class),
                is_window: matches!(column, 'A' | 'F'),
                is_aisle: matches!(column, 'C' | 'D'),
                is_exit_row: row == EXIT_ROW,
            });
        }
    }
    seats
}

struct DemoRoute {
    airline: &'static str,
    flight_number: &'static str,
    origin: (&'static str, &'static str),
    destination: (&'static str, &'static str),
    depart_in_hours: i64,
    block_minutes: i64,
    price: Decimal,
    aircraft: &'static str,
    gate: Option<&'static str>,
}

fn demo_routes() -> Vec<DemoRoute> {
    vec![
        DemoRoute {
            airline: "SkyWings",
            flight_number: "SW101",
            origin: ("New York", "JFK"),
            destination: ("Paris", "CDG"),
            depart_in_hours: 26,
            block_minutes: 435,
            price: Decimal::new(44900, 2),
            aircraft: "Boeing 787-9",
            gate: Some("B22"),
        },
        DemoRoute {
            airline: "SkyWings",
            flight_number: "SW205",
            origin: ("Los Angeles", "LAX"),
            destination: ("Tokyo", "HND"),
            depart_in_hours: 50,
            block_minutes: 690,
            price: Decimal::new(89900, 2),
            aircraft: "Airbus A350-900",
            gate: None,
        },
        DemoRoute {
            airline: "Pacific Air",
            flight_number: "PA330",
            origin: ("Singapore", "SIN"),
            destination: ("Denpasar", "DPS"),
            depart_in_hours: 6,
            block_minutes: 160,
            price: Decimal::new(79900, 2),
            aircraft: "Airbus A321neo",
            gate: Some("C7"),
        },
        DemoRoute {
            airline: "SkyWings",
            flight_number: "SW412",
            origin: ("Chicago", "ORD"),
            destination: ("New York", "JFK"),
            depart_in_hours: 3,
            block_minutes: 130,
            price: Decimal::new(29900, 2),
            aircraft: "Boeing 737 MAX 8",
            gate: Some("H4"),
        },
    ]
}

pub fn demo_flights(now: DateTime<Utc>) -> Vec<Flight> {
    demo_routes()
        .into_iter()
        .map(|route| {
            let departure_time = now + Duration::hours(route.depart_in_hours);
            Flight {
                id: Uuid::new_v4(),
                airline: route.airline.to_string(),
                flight_number: route.flight_number.to_string(),
                origin: route.origin.0.to_string(),
                origin_code: route.origin.1.to_string(),
                destination: route.destination.0.to_string(),
                destination_code: route.destination.1.to_string(),
                departure_time,
                arrival_time: departure_time + Duration::minutes(route.block_minutes),
                price: route.price,
                available_seats: 0,
                aircraft_type: route.aircraft.to_string(),
                status: FlightStatus::Scheduled,
                gate: route.gate.map(str::to_string),
                delay_minutes: None,
            }
        })
        .collect()
}

// Roughly one seat in five is already taken
fn demo_occupied(row: u32, column: char) -> bool {
    (row * 7 + column as u32) % 5 == 0
}

/// Demo flights with their seat maps and matching available seat counts.
pub fn demo_schedule(now: DateTime<Utc>) -> Vec<(Flight, Vec<Seat>)> {
    demo_flights(now)
        .into_iter()
        .map(|mut flight| {
            let seats = generate_seat_map(flight.id, DEMO_ROWS, demo_occupied);
            flight.available_seats = seats.iter().filter(|seat| seat.is_available).count() as i32;
            (flight, seats)
        })
        .collect()
}

/// Fills `repository` with the demo schedule and returns the flights seeded.
pub async fn seed_demo_data(repository: &InMemoryRepository) -> Vec<Flight> {
    let mut seeded = Vec::new();
    for (flight, seats) in demo_schedule(Utc::now()) {
        repository.insert_seats(seats).await;
        repository.insert_flight(flight.clone()).await;
        seeded.push(flight);
    }
    tracing::info!(flights = seeded.len(), "seeded demo schedule");
    seeded
}

/// Loads the demo schedule into MySQL unless flights already exist.
pub async fn seed_mysql_if_empty(repository: &MySqlRepository) -> AppResult<usize> {
    if !repository
        .search_flights(&FlightSearchQuery::default())
        .await?
        .is_empty()
    {
        return Ok(0);
    }

    let schedule = demo_schedule(Utc::now());
    for (flight, seats) in &schedule {
        repository.insert_flight_with_seats(flight, seats).await?;
    }
    tracing::info!(flights = schedule.len(), "seeded demo schedule into MySQL");
    Ok(schedule.len())
}
