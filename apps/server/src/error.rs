use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use goldrate_core::PriceDataError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] PriceDataError),
    /// A refresh run failed; the error body carries a timestamp so operators
    /// can correlate it with the trigger schedule.
    #[error("{0}")]
    RefreshFailed(PriceDataError),
    #[error("{0}")]
    Unauthorized(String),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg, timestamp) = match &self {
            ApiError::Core(e) => match e {
                // Recoverable by waiting: the scheduled job has not run yet
                PriceDataError::NoDataAvailable => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Price data not available yet. The scheduled refresh may not have run; \
                     please try again in a few minutes."
                        .to_string(),
                    None,
                ),
                // Operational issue on our side
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None),
            },
            ApiError::RefreshFailed(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
                Some(Utc::now()),
            ),
            ApiError::Unauthorized(reason) => {
                (StatusCode::UNAUTHORIZED, reason.clone(), None)
            }
        };
        let body = Json(ErrorBody {
            success: false,
            error: msg,
            timestamp,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
