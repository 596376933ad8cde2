use rocket::{Catcher, Route};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::SwaggerUIConfig;
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

pub mod booking_route;
pub mod flight_route;
pub mod operations_route;

pub(crate) fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest(format!("Invalid id {:?}", raw)))
}

/// Routes documented in the OpenAPI document, plus the openapi.json route itself.
pub fn api_routes() -> Vec<Route> {
    openapi_get_routes![
        flight_route::search_flights,
        flight_route::get_flight,
        flight_route::get_seat_map,
        flight_route::get_flight_status,
        booking_route::create_booking,
        booking_route::track_booking,
        operations_route::post_flight_update,
    ]
}

// Server-sent event routes have no OpenAPI description
pub fn stream_routes() -> Vec<Route> {
    routes![flight_route::stream_flight_status]
}

pub const UNAUTHORIZED: &str = "missing or invalid bearer token";

// Rejected bearer tokens get the same JSON error body as every other failure
#[catch(401)]
fn unauthorized() -> AppError {
    AppError::AuthError(UNAUTHORIZED.into())
}

pub fn catchers() -> Vec<Catcher> {
    catchers![unauthorized]
}

pub fn swagger_ui() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/api/openapi.json".to_string(),
        ..Default::default()
    }
}
