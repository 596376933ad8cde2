use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use skywings_booking::{
    models::booking::BookingStatus,
    models::flight::Flight,
    models::seat::SeatClass,
    repository::memory::InMemoryRepository,
    repository::BookingRepository,
    seat_map::SeatPicker,
    services::booking_service::BookingService,
    utils::error::AppError,
    utils::tracking_code::is_well_formed,
    wizard::{WizardAction, WizardState},
};
use test_context::{test_context, AsyncTestContext};
use uuid::Uuid;

mod common {
    pub mod test_utils;
}
use common::test_utils::{add_flight, booking_request, passenger, test_flight};

struct BookingServiceContext {
    repository: Arc<InMemoryRepository>,
    booking_service: BookingService,
    flight: Flight,
}

#[async_trait]
impl AsyncTestContext for BookingServiceContext {
    async fn setup() -> Self {
        let repository = Arc::new(InMemoryRepository::new());
        let flight = add_flight(&repository, test_flight("SW101", "JFK", "CDG")).await;
        let booking_service = BookingService::new(repository.clone());
        BookingServiceContext {
            repository,
            booking_service,
            flight,
        }
    }

    async fn teardown(self) {}
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_book_business_seat(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let receipt = ctx
        .booking_service
        .book(None, booking_request(&ctx.flight, "5C"))
        .await?;

    assert!(is_well_formed(&receipt.tracking_code));
    assert_eq!(receipt.seat, "5C");
    assert_eq!(receipt.seat_class, SeatClass::Business);
    assert_eq!(receipt.total_price, Decimal::new(750, 0));
    assert_eq!(receipt.total_price_display, "750.00");
    assert_eq!(receipt.gate, "B22");
    assert_eq!(
        receipt.boarding_time,
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 15, 0).unwrap()
    );
    assert_eq!(receipt.boarding_clock, "09:15 AM");
    assert_eq!(receipt.passenger.first_name, "Ada");

    let stored = ctx.repository.bookings().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].passenger_name, "Ada Lovelace");
    assert_eq!(stored[0].status, BookingStatus::Confirmed);
    assert_eq!(stored[0].total_price, Decimal::new(750, 0));

    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_book_without_gate_shows_tba(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let mut flight = test_flight("SW300", "JFK", "CDG");
    flight.gate = None;
    let flight = add_flight(&ctx.repository, flight).await;

    let receipt = ctx
        .booking_service
        .book(None, booking_request(&flight, "15A"))
        .await?;

    assert_eq!(receipt.gate, "TBA");
    assert_eq!(receipt.total_price, Decimal::new(50000, 2));

    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_book_taken_seat_is_rejected(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let result = ctx
        .booking_service
        .book(None, booking_request(&ctx.flight, "1A"))
        .await;

    assert!(matches!(result, Err(AppError::Unprocessable(_))));
    assert!(ctx.repository.bookings().await.is_empty());

    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_book_with_invalid_passenger(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let mut request = booking_request(&ctx.flight, "15A");
    request.passenger.email = "not-an-email".to_string();
    request.passenger.first_name = "   ".to_string();

    match ctx.booking_service.book(None, request).await {
        Err(AppError::ValidationError(msg)) => {
            assert!(msg.contains("email"));
            assert!(msg.contains("first_name"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
    assert!(ctx.repository.bookings().await.is_empty());

    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_track_booking_ignores_case(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let receipt = ctx
        .booking_service
        .book(Some(Uuid::new_v4()), booking_request(&ctx.flight, "15A"))
        .await?;

    let lookup = format!("  {}  ", receipt.tracking_code.to_lowercase());
    let tracked = ctx
        .booking_service
        .track_booking(&lookup)
        .await?
        .expect("booking should be found");

    assert_eq!(tracked.tracking_code, receipt.tracking_code);
    assert_eq!(tracked.flight.flight_number, "SW101");
    assert_eq!(tracked.passenger.first_name, "Ada");
    assert_eq!(tracked.passenger.last_name, "Lovelace");
    assert_eq!(tracked.seat, "15A");
    assert_eq!(tracked.boarding_time, "09:15 AM");

    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_track_unknown_code(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let tracked = ctx.booking_service.track_booking("SWZZZZZZ").await?;
    assert!(tracked.is_none());
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_persistence_failure_keeps_wizard_data(ctx: &BookingServiceContext) -> Result<(), AppError> {
    ctx.repository
        .fail_bookings_with(Some(AppError::DatabaseError("connection reset".to_string())))
        .await;

    let seats = ctx.repository.list_seats(ctx.flight.id).await?;
    let mut picker = SeatPicker::new();
    let seat = seats
        .iter()
        .find(|seat| seat.seat_number == "15A")
        .expect("seat 15A");
    assert!(picker.select(seat));

    let state = WizardState::Search
        .apply(WizardAction::SelectFlight(ctx.flight.clone()))?
        .apply(WizardAction::SelectSeat(picker.confirm()?.clone()))?
        .apply(WizardAction::Submit(passenger()))?;

    let failed = ctx.booking_service.checkout(state, None).await?;
    match &failed {
        WizardState::Failed {
            seat,
            passenger,
            error,
            ..
        } => {
            assert_eq!(seat.seat_number, "15A");
            assert_eq!(passenger.email, "ada@example.com");
            assert!(error.is_retryable());
            assert_eq!(
                error.to_string(),
                "Failed to save your request. Please try again."
            );
        }
        other => panic!("Expected Failed, got {}", other.name()),
    }
    assert!(ctx.repository.bookings().await.is_empty());

    // Resubmitting after the store recovers succeeds with the kept data
    ctx.repository.fail_bookings_with(None).await;
    let retried = failed.apply(WizardAction::Submit(passenger()))?;
    let confirmed = ctx.booking_service.checkout(retried, None).await?;
    assert!(matches!(confirmed, WizardState::Confirmed { .. }));
    assert_eq!(ctx.repository.bookings().await.len(), 1);

    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_conflict_is_surfaced_as_retryable(ctx: &BookingServiceContext) -> Result<(), AppError> {
    ctx.repository
        .fail_bookings_with(Some(AppError::Conflict(
            "Tracking code already in use. Please try again.".to_string(),
        )))
        .await;

    let error = ctx
        .booking_service
        .book(None, booking_request(&ctx.flight, "15A"))
        .await
        .expect_err("booking should fail");

    assert!(matches!(error, AppError::Conflict(_)));
    assert!(error.is_retryable());

    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_total_is_fixed_at_booking_time(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let receipt = ctx
        .booking_service
        .book(None, booking_request(&ctx.flight, "2B"))
        .await?;
    assert_eq!(receipt.total_price, Decimal::new(1250, 0));

    let mut repriced = ctx.flight.clone();
    repriced.price = Decimal::new(90000, 2);
    ctx.repository.update_flight(&repriced).await?;

    let stored = ctx.repository.bookings().await;
    assert_eq!(stored[0].total_price, Decimal::new(1250, 0));

    let tracked = ctx
        .booking_service
        .track_booking(&receipt.tracking_code)
        .await?
        .expect("booking should be found");
    assert_eq!(tracked.total_price, "1250.00");
    assert_eq!(tracked.flight.price, "900.00");

    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_half_cent_total_displays_rounded_up(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let mut flight = test_flight("SW412", "ORD", "JFK");
    flight.price = Decimal::new(29999, 2);
    let flight = add_flight(&ctx.repository, flight).await;

    let receipt = ctx
        .booking_service
        .book(None, booking_request(&flight, "5C"))
        .await?;

    // Stored unrounded, shown to the cent
    assert_eq!(receipt.total_price, Decimal::new(449985, 3));
    assert_eq!(receipt.total_price_display, "449.99");

    let tracked = ctx
        .booking_service
        .track_booking(&receipt.tracking_code)
        .await?
        .expect("booking should be found");
    assert_eq!(tracked.total_price, "449.99");

    Ok(())
}
