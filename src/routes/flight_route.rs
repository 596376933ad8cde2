use chrono::NaiveDate;
use rocket::response::stream::{Event, EventStream};
use rocket::serde::json::Json;
use rocket::tokio::select;
use rocket::{Shutdown, State};
use rocket_okapi::openapi;

use crate::models::flight::{FlightDetail, FlightSearchQuery, FlightSearchResponse};
use crate::routes::parse_id;
use crate::services::flight_service::{FlightService, SeatMapResponse};
use crate::services::status_service::StatusService;
use crate::status::StatusSnapshot;
use crate::utils::error::AppError;

/// Search flights
#[openapi(tag = "Flights")]
#[get("/flights?<origin>&<destination>&<date>")]
pub async fn search_flights(
    origin: Option<String>,
    destination: Option<String>,
    date: Option<String>,
    flight_service: &State<FlightService>,
) -> Result<Json<FlightSearchResponse>, AppError> {
    let departure_date = match date {
        Some(date) => Some(
            NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest("Invalid departure date format".into()))?,
        ),
        None => None,
    };

    let query = FlightSearchQuery {
        origin_code: origin.filter(|code| !code.trim().is_empty()),
        destination_code: destination.filter(|code| !code.trim().is_empty()),
        departure_date,
    };
    let flights = flight_service.search_flights(query).await?;
    Ok(Json(flights))
}

/// Get one flight
#[openapi(tag = "Flights")]
#[get("/flights/<flight_id>")]
pub async fn get_flight(
    flight_id: String,
    flight_service: &State<FlightService>,
) -> Result<Json<FlightDetail>, AppError> {
    let flight = flight_service.get_flight(parse_id(&flight_id)?).await?;
    Ok(Json(FlightDetail::from(&flight)))
}

/// Seat map of a flight, rows front to back
#[openapi(tag = "Flights")]
#[get("/flights/<flight_id>/seats")]
pub async fn get_seat_map(
    flight_id: String,
    flight_service: &State<FlightService>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let seat_map = flight_service.get_seat_map(parse_id(&flight_id)?).await?;
    Ok(Json(seat_map))
}

/// Current status and recent updates of a flight
#[openapi(tag = "Flight Status")]
#[get("/flights/<flight_id>/status")]
pub async fn get_flight_status(
    flight_id: String,
    status_service: &State<StatusService>,
) -> Result<Json<StatusSnapshot>, AppError> {
    let view = status_service.snapshot(parse_id(&flight_id)?).await?;
    if view.flight.is_none() {
        return Err(AppError::NotFound("Flight information not available".into()));
    }
    let summary = view.summary();
    Ok(Json(StatusSnapshot {
        view,
        summary,
        notification: None,
    }))
}

/// Live status: one event with the initial view, then one per change.
/// Closing the connection drops both subscriptions.
#[get("/flights/<flight_id>/status/stream")]
pub async fn stream_flight_status(
    flight_id: String,
    status_service: &State<StatusService>,
    mut shutdown: Shutdown,
) -> Result<EventStream![], AppError> {
    let mut monitor = status_service.open(parse_id(&flight_id)?).await?;
    if monitor.view().flight.is_none() {
        return Err(AppError::NotFound("Flight information not available".into()));
    }

    Ok(EventStream! {
        yield Event::json(&monitor.snapshot(None)).event("status");
        loop {
            let notification = select! {
                change = monitor.next_change() => match change {
                    Some(notification) => notification,
                    None => break,
                },
                _ = &mut shutdown => break,
            };
            yield Event::json(&monitor.snapshot(Some(notification))).event("status");
        }
    })
}
