use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::models::booking::{BookingReceipt, BookingRequest, TrackedBooking};
use crate::services::booking_service::{BookingService, BOOKING_NOT_FOUND};
use crate::utils::error::AppError;
use crate::utils::jwt::MaybeUser;

/// Book a seat. A bearer token, when present, ties the booking to the user.
#[openapi(tag = "Bookings")]
#[post("/bookings", format = "json", data = "<request>")]
pub async fn create_booking(
    request: Json<BookingRequest>,
    user: MaybeUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingReceipt>, AppError> {
    let receipt = booking_service
        .book(user.user_id, request.into_inner())
        .await?;
    Ok(Json(receipt))
}

/// Look a booking up by its tracking code (any case)
#[openapi(tag = "Bookings")]
#[get("/bookings/track?<code>")]
pub async fn track_booking(
    code: String,
    booking_service: &State<BookingService>,
) -> Result<Json<TrackedBooking>, AppError> {
    booking_service
        .track_booking(&code)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(BOOKING_NOT_FOUND.into()))
}
