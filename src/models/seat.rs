use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display, EnumString,
    sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[sqlx(type_name = "ENUM", rename_all = "snake_case")]
pub enum SeatClass {
    First,
    Business,
    Economy,
}

impl SeatClass {
    pub fn label(&self) -> &'static str {
        match self {
            SeatClass::First => "First Class",
            SeatClass::Business => "Business Class",
            SeatClass::Economy => "Economy Class",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct Seat {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub seat_number: String,
    pub seat_class: SeatClass,
    pub is_available: bool,
    pub price_modifier: Decimal,
    pub is_window: bool,
    pub is_aisle: bool,
    pub is_exit_row: bool,
}

impl Seat {
    /// Row digits of the seat number, e.g. 12 for "12C".
    pub fn row_number(&self) -> Option<u32> {
        let digits = self.seat_number.get(..self.seat_number.len().checked_sub(1)?)?;
        digits.parse().ok()
    }

    /// Trailing column letter, e.g. 'C' for "12C".
    pub fn column(&self) -> Option<char> {
        self.seat_number
            .chars()
            .last()
            .map(|c| c.to_ascii_uppercase())
            .filter(char::is_ascii_alphabetic)
    }

    pub fn price_for(&self, base_price: Decimal) -> Decimal {
        base_price * self.price_modifier
    }

    // "Business Class • Window • Exit Row"
    pub fn description(&self) -> String {
        let mut parts = vec![self.seat_class.label().to_string()];
        if self.is_window {
            parts.push("Window".to_string());
        }
        if self.is_aisle {
            parts.push("Aisle".to_string());
        }
        if self.is_exit_row {
            parts.push("Exit Row".to_string());
        }
        parts.join(" • ")
    }
}
