use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing name or number")]
    MissingField,

    #[error("Malformatted ID")]
    MalformattedId,

    #[error("Person with id {0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("corrupt person record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MissingField | ApiError::MalformattedId | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Corrupt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{self}");
            return (status, Json(json!({ "error": "internal server error" }))).into_response();
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
