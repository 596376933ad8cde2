use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::models::flight::FlightStatus;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[sqlx(type_name = "ENUM", rename_all = "snake_case")]
pub enum UpdateType {
    Delay,
    GateChange,
    StatusChange,
    Other,
}

/// How loudly a new log entry is announced to the traveller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Warning,
    Info,
    Neutral,
}

impl UpdateType {
    pub fn notification_level(&self) -> NotificationLevel {
        match self {
            UpdateType::Delay => NotificationLevel::Warning,
            UpdateType::GateChange => NotificationLevel::Info,
            UpdateType::StatusChange | UpdateType::Other => NotificationLevel::Neutral,
        }
    }
}

// One entry of the append-only flight update log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct FlightUpdate {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub update_type: UpdateType,
    pub message: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFlightUpdate {
    pub flight_id: Uuid,
    pub update_type: UpdateType,
    pub message: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// An operational change pushed by the airline side.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationalUpdate {
    Delay { minutes: i32 },
    GateChange { gate: String },
    StatusChange { status: FlightStatus },
    Notice { message: String },
}
