use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::groundtrack::TrackError;

pub enum ApiError {
    NotFound(String),
    Conflict(String),
    Unprocessable(&'static str, String),
}

impl From<TrackError> for ApiError {
    fn from(e: TrackError) -> Self {
        match e {
            TrackError::UnknownObject(_) => ApiError::NotFound(e.to_string()),
            TrackError::NotActive(_) => ApiError::Conflict(e.to_string()),
            TrackError::InvalidElementSet(_) => {
                ApiError::Unprocessable("invalid_element_set", e.to_string())
            }
            TrackError::Propagation(_) => {
                ApiError::Unprocessable("propagation_failed", e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::with_message("unknown_object", &msg)),
            )
                .into_response(),
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                Json(ErrorResponse::with_message("no_element_set", &msg)),
            )
                .into_response(),
            ApiError::Unprocessable(reason, msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::with_message(reason, &msg)),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
