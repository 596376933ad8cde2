#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

pub mod config;
pub mod db;
pub mod models;
pub mod realtime;
pub mod repository;
pub mod routes;
pub mod seat_map;
pub mod services;
pub mod status;
pub mod utils;
pub mod wizard;

use std::sync::Arc;

use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_okapi::swagger_ui::make_swagger_ui;

use crate::config::AuthConfig;
use crate::realtime::ChangeFeed;
use crate::repository::BookingRepository;
use crate::services::booking_service::BookingService;
use crate::services::flight_service::FlightService;
use crate::services::operations_service::OperationsService;
use crate::services::status_service::StatusService;

/// Everything the HTTP layer needs, wired around one repository and one
/// change feed.
#[derive(Clone)]
pub struct AppState {
    pub flight_service: FlightService,
    pub booking_service: BookingService,
    pub status_service: StatusService,
    pub operations_service: OperationsService,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn BookingRepository>, feed: ChangeFeed, auth: AuthConfig) -> Self {
        AppState {
            flight_service: FlightService::new(repository.clone()),
            booking_service: BookingService::new(repository.clone()),
            status_service: StatusService::new(repository.clone(), feed.clone()),
            operations_service: OperationsService::new(repository, feed),
            auth,
        }
    }
}

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state.flight_service)
        .manage(state.booking_service)
        .manage(state.status_service)
        .manage(state.operations_service)
        .manage(state.auth)
        .mount("/api", routes::api_routes())
        .mount("/api", routes::stream_routes())
        .mount("/swagger", make_swagger_ui(&routes::swagger_ui()))
        .register("/", routes::catchers())
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}
