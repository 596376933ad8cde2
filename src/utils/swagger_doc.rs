use crate::routes::UNAUTHORIZED;
use crate::utils::error::AppError;
use okapi::openapi3::SchemaObject;
use rocket::http::Status;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::RefOr;
use rocket_okapi::okapi::openapi3::{MediaType, Response, Responses};
use rocket_okapi::okapi::Map;
use rocket_okapi::response::OpenApiResponderInner;
use serde_json::json;

impl OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Responses::default();

        // One documented example per status the booking API can answer with
        let error_responses = [
            (
                "Bad Request",
                AppError::ValidationError("invalid or missing fields: email".to_string()),
            ),
            (
                "Unauthorized",
                AppError::AuthError(UNAUTHORIZED.to_string()),
            ),
            (
                "Not Found",
                AppError::NotFound(
                    "No booking found with this tracking code. Please check and try again."
                        .to_string(),
                ),
            ),
            (
                "Conflict",
                AppError::Conflict("Tracking code already in use. Please try again.".to_string()),
            ),
            (
                "Internal Server Error",
                AppError::DatabaseError(String::new()),
            ),
            (
                "Unprocessable",
                AppError::Unprocessable("seat 3C is not available".to_string()),
            ),
        ];

        for (description, error) in error_responses {
            let status: Status = error.status();
            let mut content = Map::new();
            content.insert(
                "application/json".to_string(),
                MediaType {
                    schema: Some(SchemaObject::default()),
                    example: Some(json!({
                        "error": error.to_string(),
                        "retryable": error.is_retryable(),
                    })),
                    ..Default::default()
                },
            );
            responses.responses.insert(
                status.code.to_string(),
                RefOr::Object(Response {
                    description: description.to_string(),
                    content,
                    ..Default::default()
                }),
            );
        }

        Ok(responses)
    }
}
