use thiserror::Error;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::Request;
use rocket::Response;
use rocket::http::ContentType;
use std::io::Cursor;
use serde_json::json;
use serde::Serialize;
use rocket_okapi::JsonSchema;

#[derive(Error, Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub enum AppError {
    // The inner message is only logged, never shown to the caller
    #[error("Failed to save your request. Please try again.")]
    DatabaseError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // Shown verbatim, e.g. the "no booking found" message
    #[error("{0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the caller may simply try the same operation again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::DatabaseError(_) | AppError::Conflict(_))
    }

    pub fn status(&self) -> Status {
        match self {
            AppError::ValidationError(_) => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::DatabaseError(_) => Status::InternalServerError,
            AppError::AuthError(_) => Status::Unauthorized,
            AppError::Conflict(_) => Status::Conflict,
            AppError::Unprocessable(_) => Status::UnprocessableEntity,
            AppError::BadRequest(_) => Status::BadRequest,
        }
    }
}

// Unique violations only come from the tracking code constraint, which a
// fresh code fixes
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Conflict(
                    "Tracking code already in use. Please try again.".into(),
                );
            }
        }
        AppError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        AppError::ValidationError(format!("invalid or missing fields: {}", fields.join(", ")))
    }
}

// Define a type alias for the result type
pub type AppResult<T> = Result<T, AppError>;

// Format all errors from the route level into a JSON http response
#[rocket::async_trait]
impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, _: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status();

        if let AppError::DatabaseError(detail) = &self {
            tracing::error!(%detail, "persistence failure surfaced to caller");
        }

        let json = json!({
            "error": self.to_string(),
            "retryable": self.is_retryable(),
        });

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(None, Cursor::new(json.to_string()))
            .ok()
    }
}
