use std::sync::Arc;

use uuid::Uuid;

use crate::models::booking::{
    BookingReceipt, BookingRequest, NewBooking, PassengerSummary, TrackedBooking, TBA,
};
use crate::models::flight::FlightDetail;
use crate::repository::BookingRepository;
use crate::seat_map::SeatPicker;
use crate::utils::error::{AppError, AppResult};
use crate::utils::format;
use crate::utils::tracking_code::{generate_tracking_code, normalize_tracking_code};
use crate::wizard::{WizardAction, WizardState};

pub const BOOKING_NOT_FOUND: &str = "No booking found with this tracking code. Please check and try again.";

#[derive(Clone)]
pub struct BookingService {
    repository: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        BookingService { repository }
    }

    /// Runs the whole wizard for one request: flight, seat, passenger form,
    /// checkout. Returns the receipt or the error the wizard stopped on.
    pub async fn book(&self, user_id: Option<Uuid>, request: BookingRequest) -> AppResult<BookingReceipt> {
        let flight = self
            .repository
            .get_flight(request.flight_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flight not found".into()))?;

        let seats = self.repository.list_seats(flight.id).await?;
        let seat = seats
            .iter()
            .find(|seat| seat.seat_number.eq_ignore_ascii_case(request.seat_number.trim()))
            .ok_or_else(|| AppError::NotFound(format!("Seat {} not found", request.seat_number)))?;

        let mut picker = SeatPicker::new();
        picker.select(seat);
        let seat = picker.confirm().map_err(|_| {
            AppError::Unprocessable(format!("seat {} is not available", seat.seat_number))
        })?;

        let state = WizardState::Search
            .apply(WizardAction::SelectFlight(flight))?
            .apply(WizardAction::SelectSeat(seat.clone()))?
            .apply(WizardAction::Submit(request.passenger))?;

        match self.checkout(state, user_id).await? {
            WizardState::Confirmed { receipt } => Ok(receipt),
            WizardState::Failed { error, .. } => Err(error),
            other => Err(AppError::Unprocessable(format!(
                "booking stopped while {}",
                other.name()
            ))),
        }
    }

    /// Persists the booking held by a `Submitting` wizard and moves it to
    /// `Confirmed`, or to `Failed` when the store rejects the row.
    pub async fn checkout(&self, state: WizardState, user_id: Option<Uuid>) -> AppResult<WizardState> {
        let (flight, seat, passenger) = match &state {
            WizardState::Submitting {
                flight,
                seat,
                passenger,
            } => (flight.clone(), seat.clone(), passenger.clone()),
            other => {
                return Err(AppError::Unprocessable(format!(
                    "cannot check out while {}",
                    other.name()
                )))
            }
        };

        let tracking_code = generate_tracking_code();
        let boarding_time = flight.boarding_time();
        // Fixed here; later fare changes never touch a confirmed booking
        let total_price = seat.price_for(flight.price);
        let gate = flight.gate.clone().unwrap_or_else(|| TBA.to_string());

        let new_booking = NewBooking {
            user_id,
            flight_id: flight.id,
            tracking_code: tracking_code.clone(),
            passenger_name: passenger.full_name(),
            passenger_email: passenger.email.clone(),
            passenger_phone: passenger.phone.clone(),
            seat_number: seat.seat_number.clone(),
            gate: gate.clone(),
            boarding_time,
            total_price,
        };

        match self.repository.create_booking(new_booking).await {
            Ok(booking) => {
                tracing::info!(
                    tracking_code = %booking.tracking_code,
                    flight = %flight.flight_number,
                    seat = %booking.seat_number,
                    "booking confirmed"
                );
                let receipt = BookingReceipt {
                    tracking_code,
                    flight: FlightDetail::from(&flight),
                    passenger: PassengerSummary::from(&passenger),
                    seat: seat.seat_number.clone(),
                    seat_class: seat.seat_class,
                    gate,
                    boarding_time,
                    boarding_clock: format::format_clock(boarding_time),
                    total_price,
                    total_price_display: format::format_price(total_price),
                };
                state.apply(WizardAction::SubmissionSucceeded(receipt))
            }
            Err(error) => {
                tracing::warn!(
                    flight = %flight.flight_number,
                    seat = %seat.seat_number,
                    %error,
                    "booking rejected by store"
                );
                state.apply(WizardAction::SubmissionFailed(error))
            }
        }
    }

    /// Case-insensitive lookup. A miss is `Ok(None)`, not an error.
    pub async fn track_booking(&self, tracking_code: &str) -> AppResult<Option<TrackedBooking>> {
        let code = normalize_tracking_code(tracking_code);
        let booking = match self.repository.get_booking_by_code(&code).await? {
            Some(booking) => booking,
            None => {
                tracing::debug!(%code, "no booking for tracking code");
                return Ok(None);
            }
        };

        let flight = self
            .repository
            .get_flight(booking.flight_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flight not found".into()))?;

        Ok(Some(TrackedBooking::new(&booking, &flight)))
    }
}
