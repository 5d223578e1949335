use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The update body parsed as JSON but is not an object.
    #[error("update body is not a JSON object")]
    NotAnObject,
    /// The update body lacks `title` or `challenges`.
    #[error("update body is missing 'title' or 'challenges'")]
    MissingFields,
    /// Any other failure while decoding or applying an update.
    #[error("malformed update: {0}")]
    Malformed(String),
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotAnObject => {
                AppError::BadRequest("Invalid JSON format. Expected a dictionary.".into())
            }
            ServiceError::MissingFields => {
                AppError::BadRequest("Missing 'title' or 'challenges' in request data.".into())
            }
            ServiceError::Malformed(_) => AppError::BadRequest("Malformed JSON.".into()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, payload).into_response()
    }
}
