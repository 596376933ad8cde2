use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::models::flight::{Flight, FlightDetail};
use crate::models::seat::SeatClass;
use crate::utils::format;

// Shown when no gate or boarding time is known yet
pub const TBA: &str = "TBA";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString, sqlx::Type,
)]
#[sqlx(type_name = "ENUM")]
pub enum BookingStatus {
    #[serde(rename = "confirmed")]
    #[strum(serialize = "confirmed")]
    #[sqlx(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "checked-in")]
    #[strum(serialize = "checked-in")]
    #[sqlx(rename = "checked-in")]
    CheckedIn,
    #[serde(rename = "boarded")]
    #[strum(serialize = "boarded")]
    #[sqlx(rename = "boarded")]
    Boarded,
    #[serde(rename = "completed")]
    #[strum(serialize = "completed")]
    #[sqlx(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    #[strum(serialize = "cancelled")]
    #[sqlx(rename = "cancelled")]
    Cancelled,
}

// Stored booking row
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub flight_id: Uuid,
    pub tracking_code: String,
    pub passenger_name: String,
    pub passenger_email: String,
    pub passenger_phone: Option<String>,
    pub seat_number: String,
    pub gate: Option<String>,
    pub boarding_time: Option<DateTime<Utc>>,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

// Insert payload; id, status and created_at are assigned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub user_id: Option<Uuid>,
    pub flight_id: Uuid,
    pub tracking_code: String,
    pub passenger_name: String,
    pub passenger_email: String,
    pub passenger_phone: Option<String>,
    pub seat_number: String,
    pub gate: String,
    pub boarding_time: DateTime<Utc>,
    pub total_price: Decimal,
}

/// Passenger form. Everything is required except the phone number.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema, Validate)]
pub struct PassengerDetails {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub passport: String,
}

impl PassengerDetails {
    /// Trims every field and turns a blank phone into no phone, so that
    /// whitespace-only input fails the required-field checks.
    pub fn normalized(self) -> Self {
        PassengerDetails {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self
                .phone
                .map(|phone| phone.trim().to_string())
                .filter(|phone| !phone.is_empty()),
            passport: self.passport.trim().to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PassengerSummary {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl From<&PassengerDetails> for PassengerSummary {
    fn from(details: &PassengerDetails) -> Self {
        PassengerSummary {
            first_name: details.first_name.clone(),
            last_name: details.last_name.clone(),
            email: details.email.clone(),
            phone: details.phone.clone().unwrap_or_default(),
        }
    }
}

impl PassengerSummary {
    // The store keeps one name column; the first word is the first name
    pub fn from_stored(name: &str, email: &str, phone: Option<&str>) -> Self {
        let mut words = name.split(' ');
        let first_name = words.next().unwrap_or_default().to_string();
        let last_name = words.collect::<Vec<_>>().join(" ");
        PassengerSummary {
            first_name,
            last_name,
            email: email.to_string(),
            phone: phone.unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BookingRequest {
    pub flight_id: Uuid,
    pub seat_number: String,
    pub passenger: PassengerDetails,
}

/// Everything the confirmation screen and the printable ticket show.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct BookingReceipt {
    pub tracking_code: String,
    pub flight: FlightDetail,
    pub passenger: PassengerSummary,
    pub seat: String,
    pub seat_class: SeatClass,
    pub gate: String,
    pub boarding_time: DateTime<Utc>,
    pub boarding_clock: String,
    pub total_price: Decimal,
    pub total_price_display: String,
}

// Shape returned by the tracking lookup
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct TrackedBooking {
    pub id: Uuid,
    pub tracking_code: String,
    pub flight: FlightDetail,
    pub passenger: PassengerSummary,
    pub seat: String,
    pub gate: String,
    pub boarding_time: String,
    pub status: BookingStatus,
    pub total_price: String,
    pub booked_at: DateTime<Utc>,
}

impl TrackedBooking {
    pub fn new(booking: &Booking, flight: &Flight) -> Self {
        TrackedBooking {
            id: booking.id,
            tracking_code: booking.tracking_code.clone(),
            flight: FlightDetail::from(flight),
            passenger: PassengerSummary::from_stored(
                &booking.passenger_name,
                &booking.passenger_email,
                booking.passenger_phone.as_deref(),
            ),
            seat: booking.seat_number.clone(),
            gate: booking.gate.clone().unwrap_or_else(|| TBA.to_string()),
            boarding_time: booking
                .boarding_time
                .map(format::format_clock)
                .unwrap_or_else(|| TBA.to_string()),
            status: booking.status,
            total_price: format::format_price(booking.total_price),
            booked_at: booking.created_at,
        }
    }
}
