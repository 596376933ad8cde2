// `apply` never touches storage; BookingService::checkout persists the
// Submitting state and feeds the outcome back in.

use validator::Validate;

use crate::models::booking::{BookingReceipt, PassengerDetails};
use crate::models::flight::Flight;
use crate::models::seat::Seat;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum WizardState {
    #[default]
    Search,
    FlightSelected {
        flight: Flight,
    },
    SeatSelected {
        flight: Flight,
        seat: Seat,
    },
    Submitting {
        flight: Flight,
        seat: Seat,
        passenger: PassengerDetails,
    },
    Confirmed {
        receipt: BookingReceipt,
    },
    Failed {
        flight: Flight,
        seat: Seat,
        passenger: PassengerDetails,
        error: AppError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    SelectFlight(Flight),
    SelectSeat(Seat),
    Back,
    Submit(PassengerDetails),
    SubmissionSucceeded(BookingReceipt),
    SubmissionFailed(AppError),
    StartOver,
}

impl WizardState {
    pub fn name(&self) -> &'static str {
        match self {
            WizardState::Search => "search",
            WizardState::FlightSelected { .. } => "flight_selected",
            WizardState::SeatSelected { .. } => "seat_selected",
            WizardState::Submitting { .. } => "submitting",
            WizardState::Confirmed { .. } => "confirmed",
            WizardState::Failed { .. } => "failed",
        }
    }

    /// The flight chosen so far, if any.
    pub fn flight(&self) -> Option<&Flight> {
        match self {
            WizardState::FlightSelected { flight }
            | WizardState::SeatSelected { flight, .. }
            | WizardState::Submitting { flight, .. }
            | WizardState::Failed { flight, .. } => Some(flight),
            WizardState::Search | WizardState::Confirmed { .. } => None,
        }
    }

    pub fn seat(&self) -> Option<&Seat> {
        match self {
            WizardState::SeatSelected { seat, .. }
            | WizardState::Submitting { seat, .. }
            | WizardState::Failed { seat, .. } => Some(seat),
            _ => None,
        }
    }

    /// The error to show after a failed submission.
    pub fn error(&self) -> Option<&AppError> {
        match self {
            WizardState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn apply(self, action: WizardAction) -> AppResult<WizardState> {
        use WizardAction as A;
        use WizardState as S;

        let from = self.name();
        match (self, action) {
            // Picking another flight from the result list restarts seat choice
            (S::Search | S::FlightSelected { .. }, A::SelectFlight(flight)) => {
                Ok(S::FlightSelected { flight })
            }

            (S::FlightSelected { flight } | S::SeatSelected { flight, .. }, A::SelectSeat(seat)) => {
                if seat.flight_id != flight.id {
                    return Err(AppError::Unprocessable(format!(
                        "seat {} does not belong to flight {}",
                        seat.seat_number, flight.flight_number
                    )));
                }
                if !seat.is_available {
                    return Err(AppError::Unprocessable(format!(
                        "seat {} is not available",
                        seat.seat_number
                    )));
                }
                Ok(S::SeatSelected { flight, seat })
            }

            (S::FlightSelected { .. }, A::Back) => Ok(S::Search),
            (S::SeatSelected { flight, .. }, A::Back) => Ok(S::FlightSelected { flight }),
            (S::Failed { flight, seat, .. }, A::Back) => Ok(S::SeatSelected { flight, seat }),

            (S::SeatSelected { flight, seat } | S::Failed { flight, seat, .. }, A::Submit(passenger)) => {
                let passenger = passenger.normalized();
                passenger.validate()?;
                Ok(S::Submitting {
                    flight,
                    seat,
                    passenger,
                })
            }

            (S::Submitting { .. }, A::SubmissionSucceeded(receipt)) => Ok(S::Confirmed { receipt }),
            (
                S::Submitting {
                    flight,
                    seat,
                    passenger,
                },
                A::SubmissionFailed(error),
            ) => Ok(S::Failed {
                flight,
                seat,
                passenger,
                error,
            }),

            (S::Confirmed { .. }, A::StartOver) => Ok(S::Search),

            (_, action) => Err(AppError::Unprocessable(format!(
                "cannot {} while {}",
                action_name(&action),
                from
            ))),
        }
    }
}

fn action_name(action: &WizardAction) -> &'static str {
    match action {
        WizardAction::SelectFlight(_) => "select a flight",
        WizardAction::SelectSeat(_) => "select a seat",
        WizardAction::Back => "go back",
        WizardAction::Submit(_) => "submit passenger details",
        WizardAction::SubmissionSucceeded(_) => "confirm a booking",
        WizardAction::SubmissionFailed(_) => "fail a submission",
        WizardAction::StartOver => "start over",
    }
}
