use std::sync::Arc;

use uuid::Uuid;

use crate::models::booking::TBA;
use crate::models::flight::{Flight, FlightStatus};
use crate::models::flight_update::{FlightUpdate, NewFlightUpdate, OperationalUpdate, UpdateType};
use crate::realtime::{ChangeEvent, ChangeFeed};
use crate::repository::BookingRepository;
use crate::utils::error::{AppError, AppResult};

/// Applies airline-side operational changes to a flight, records them in
/// the update log and pushes both rows to status subscribers.
#[derive(Clone)]
pub struct OperationsService {
    repository: Arc<dyn BookingRepository>,
    feed: ChangeFeed,
}

// Flight row after the change plus the log entry describing it
fn plan_update(flight: &Flight, update: OperationalUpdate) -> AppResult<(Option<Flight>, NewFlightUpdate)> {
    let mut changed = flight.clone();

    let (update_type, message, old_value, new_value) = match update {
        OperationalUpdate::Delay { minutes } => {
            if minutes <= 0 {
                return Err(AppError::ValidationError(
                    "delay must be a positive number of minutes".into(),
                ));
            }
            changed.status = FlightStatus::Delayed;
            changed.delay_minutes = Some(minutes);
            (
                UpdateType::Delay,
                format!("Flight {} delayed by {} minutes", flight.flight_number, minutes),
                flight.delay_minutes.map(|m| m.to_string()),
                Some(minutes.to_string()),
            )
        }
        OperationalUpdate::GateChange { gate } => {
            let gate = gate.trim().to_uppercase();
            if gate.is_empty() {
                return Err(AppError::ValidationError("gate must not be empty".into()));
            }
            changed.gate = Some(gate.clone());
            (
                UpdateType::GateChange,
                format!(
                    "Gate changed from {} to {}",
                    flight.gate.as_deref().unwrap_or(TBA),
                    gate
                ),
                flight.gate.clone(),
                Some(gate),
            )
        }
        OperationalUpdate::StatusChange { status } => {
            changed.status = status;
            (
                UpdateType::StatusChange,
                format!("Flight {} is now {}", flight.flight_number, status.label()),
                Some(flight.status.to_string()),
                Some(status.to_string()),
            )
        }
        OperationalUpdate::Notice { message } => {
            let message = message.trim().to_string();
            if message.is_empty() {
                return Err(AppError::ValidationError("notice must not be empty".into()));
            }
            (UpdateType::Other, message, None, None)
        }
    };

    let flight_row = if changed != *flight { Some(changed) } else { None };
    let entry = NewFlightUpdate {
        flight_id: flight.id,
        update_type,
        message,
        old_value,
        new_value,
    };
    Ok((flight_row, entry))
}

impl OperationsService {
    pub fn new(repository: Arc<dyn BookingRepository>, feed: ChangeFeed) -> Self {
        OperationsService { repository, feed }
    }

    pub async fn apply(&self, flight_id: Uuid, update: OperationalUpdate) -> AppResult<FlightUpdate> {
        let flight = self
            .repository
            .get_flight(flight_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flight not found".into()))?;

        let (flight_row, entry) = plan_update(&flight, update)?;

        if let Some(changed) = &flight_row {
            self.repository.update_flight(changed).await?;
        }
        let logged = self.repository.insert_flight_update(entry).await?;

        tracing::info!(
            flight = %flight.flight_number,
            update_type = %logged.update_type,
            message = %logged.message,
            "operational update applied"
        );

        if let Some(changed) = flight_row {
            self.feed.publish(ChangeEvent::FlightUpdated(changed));
        }
        self.feed.publish(ChangeEvent::UpdateInserted(logged.clone()));

        Ok(logged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn flight() -> Flight {
        let departure = Utc::now();
        Flight {
            id: Uuid::new_v4(),
            airline: "SkyWings".into(),
            flight_number: "SW412".into(),
            origin: "Chicago".into(),
            origin_code: "ORD".into(),
            destination: "New York".into(),
            destination_code: "JFK".into(),
            departure_time: departure,
            arrival_time: departure + chrono::Duration::minutes(130),
            price: Decimal::new(29900, 2),
            available_seats: 90,
            aircraft_type: "Boeing 737 MAX 8".into(),
            status: FlightStatus::Scheduled,
            gate: None,
            delay_minutes: None,
        }
    }

    #[test]
    fn delay_sets_status_and_minutes() {
        let (row, entry) = plan_update(&flight(), OperationalUpdate::Delay { minutes: 20 }).unwrap();
        let row = row.unwrap();
        assert_eq!(row.status, FlightStatus::Delayed);
        assert_eq!(row.delay_minutes, Some(20));
        assert_eq!(entry.update_type, UpdateType::Delay);
        assert_eq!(entry.message, "Flight SW412 delayed by 20 minutes");
    }

    #[test]
    fn gate_change_from_unknown_gate() {
        let (row, entry) =
            plan_update(&flight(), OperationalUpdate::GateChange { gate: "h7".into() }).unwrap();
        assert_eq!(row.unwrap().gate.as_deref(), Some("H7"));
        assert_eq!(entry.message, "Gate changed from TBA to H7");
        assert_eq!(entry.old_value, None);
    }

    #[test]
    fn status_change_records_old_and_new() {
        let (_, entry) = plan_update(
            &flight(),
            OperationalUpdate::StatusChange {
                status: FlightStatus::InFlight,
            },
        )
        .unwrap();
        assert_eq!(entry.message, "Flight SW412 is now In Flight");
        assert_eq!(entry.old_value.as_deref(), Some("scheduled"));
        assert_eq!(entry.new_value.as_deref(), Some("in_flight"));
    }

    #[test]
    fn notice_leaves_the_flight_alone() {
        let (row, entry) = plan_update(
            &flight(),
            OperationalUpdate::Notice {
                message: "Catering restocked".into(),
            },
        )
        .unwrap();
        assert!(row.is_none());
        assert_eq!(entry.update_type, UpdateType::Other);
    }

    #[test]
    fn non_positive_delay_is_rejected() {
        assert!(plan_update(&flight(), OperationalUpdate::Delay { minutes: 0 }).is_err());
    }
}
