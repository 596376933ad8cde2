use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::utils::format;

// Operational status, stored as an ENUM column
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[sqlx(type_name = "ENUM", rename_all = "snake_case")]
pub enum FlightStatus {
    Scheduled,
    Boarding,
    Departed,
    InFlight,
    Landed,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "Scheduled",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::Departed => "Departed",
            FlightStatus::InFlight => "In Flight",
            FlightStatus::Landed => "Landed",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct Flight {
    pub id: Uuid,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub origin_code: String,
    pub destination: String,
    pub destination_code: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub price: Decimal,
    pub available_seats: i32,
    pub aircraft_type: String,
    pub status: FlightStatus,
    pub gate: Option<String>,
    pub delay_minutes: Option<i32>,
}

impl Flight {
    pub fn duration(&self) -> String {
        format::flight_duration(self.departure_time, self.arrival_time)
    }

    pub fn boarding_time(&self) -> DateTime<Utc> {
        format::boarding_time(self.departure_time)
    }

    pub fn is_delayed(&self) -> bool {
        self.delay_minutes.map_or(false, |minutes| minutes > 0)
    }

    pub fn delay_notice(&self) -> Option<String> {
        match self.delay_minutes {
            Some(minutes) if minutes > 0 => Some(format!("Delayed by {} minutes", minutes)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FlightSearchQuery {
    pub origin_code: Option<String>,
    pub destination_code: Option<String>,
    pub departure_date: Option<NaiveDate>,
}

impl FlightSearchQuery {
    pub fn matches(&self, flight: &Flight) -> bool {
        let origin_ok = self
            .origin_code
            .as_deref()
            .map_or(true, |code| flight.origin_code.eq_ignore_ascii_case(code));
        let destination_ok = self
            .destination_code
            .as_deref()
            .map_or(true, |code| flight.destination_code.eq_ignore_ascii_case(code));
        let date_ok = self
            .departure_date
            .map_or(true, |date| flight.departure_time.date_naive() == date);
        origin_ok && destination_ok && date_ok
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct FlightSearchResponse {
    pub flights: Vec<FlightDetail>,
}

// Few enough seats left to warn the traveller
pub const SEATS_LOW_THRESHOLD: i32 = 10;

// Single flight card in FlightSearchResponse
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct FlightDetail {
    pub id: Uuid,
    pub airline: String,
    pub flight_number: String,
    pub aircraft_type: String,
    pub origin: String,
    pub origin_code: String,
    pub destination: String,
    pub destination_code: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub departure_clock: String,
    pub arrival_clock: String,
    pub departure_day: String,
    pub duration: String,
    pub price: String,
    pub available_seats: i32,
    pub seats_low: bool,
    pub status: FlightStatus,
    pub status_label: String,
    pub gate: Option<String>,
    pub delay_minutes: Option<i32>,
}

impl From<&Flight> for FlightDetail {
    fn from(flight: &Flight) -> Self {
        FlightDetail {
            id: flight.id,
            airline: flight.airline.clone(),
            flight_number: flight.flight_number.clone(),
            aircraft_type: flight.aircraft_type.clone(),
            origin: flight.origin.clone(),
            origin_code: flight.origin_code.clone(),
            destination: flight.destination.clone(),
            destination_code: flight.destination_code.clone(),
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            departure_clock: format::format_clock(flight.departure_time),
            arrival_clock: format::format_clock(flight.arrival_time),
            departure_day: format::format_day(flight.departure_time),
            duration: flight.duration(),
            price: format::format_price(flight.price),
            available_seats: flight.available_seats,
            seats_low: flight.available_seats < SEATS_LOW_THRESHOLD,
            status: flight.status,
            status_label: flight.status.label().to_string(),
            gate: flight.gate.clone(),
            delay_minutes: flight.delay_minutes.filter(|minutes| *minutes > 0),
        }
    }
}
