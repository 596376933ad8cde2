use std::sync::Arc;

use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

use crate::models::flight::{Flight, FlightDetail, FlightSearchQuery, FlightSearchResponse};
use crate::repository::BookingRepository;
use crate::seat_map::SeatMap;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Serialize, JsonSchema)]
pub struct SeatMapResponse {
    pub flight: FlightDetail,
    pub seat_map: SeatMap,
}

#[derive(Clone)]
pub struct FlightService {
    repository: Arc<dyn BookingRepository>,
}

impl FlightService {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        FlightService { repository }
    }

    // Search flights, earliest departure first
    pub async fn search_flights(&self, search_query: FlightSearchQuery) -> AppResult<FlightSearchResponse> {
        let flights = self.repository.search_flights(&search_query).await?;
        tracing::debug!(
            origin = ?search_query.origin_code,
            destination = ?search_query.destination_code,
            date = ?search_query.departure_date,
            results = flights.len(),
            "flight search"
        );

        Ok(FlightSearchResponse {
            flights: flights.iter().map(FlightDetail::from).collect(),
        })
    }

    pub async fn get_flight(&self, flight_id: Uuid) -> AppResult<Flight> {
        self.repository
            .get_flight(flight_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flight not found".into()))
    }

    pub async fn get_seat_map(&self, flight_id: Uuid) -> AppResult<SeatMapResponse> {
        let flight = self.get_flight(flight_id).await?;
        let seats = self.repository.list_seats(flight_id).await?;
        let seat_map = SeatMap::build(seats, flight.price);

        Ok(SeatMapResponse {
            flight: FlightDetail::from(&flight),
            seat_map,
        })
    }
}
