use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::models::flight_update::{FlightUpdate, OperationalUpdate};
use crate::routes::parse_id;
use crate::services::operations_service::OperationsService;
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;

/// Push an operational change (delay, gate, status, notice) for a flight
#[openapi(tag = "Operations")]
#[post("/flights/<flight_id>/updates", format = "json", data = "<update>")]
pub async fn post_flight_update(
    flight_id: String,
    update: Json<OperationalUpdate>,
    auth: AuthenticatedUser,
    operations_service: &State<OperationsService>,
) -> Result<Json<FlightUpdate>, AppError> {
    let flight_id = parse_id(&flight_id)?;
    tracing::info!(%flight_id, user = %auth.user_id, "operational update requested");
    let logged = operations_service
        .apply(flight_id, update.into_inner())
        .await?;
    Ok(Json(logged))
}
