//! Route modules and the shared response envelope.

pub mod bookings;
pub mod clients;
pub mod feed;
pub mod procedures;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use nailcal_core::SalonError;

/// Standard `{success, ...}` envelope for all JSON endpoints.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Advisory conflict warning on booking writes. Never blocks the write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            warning: None,
            error: None,
        }
    }

    pub fn with_warning(data: T, warning: Option<String>) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            warning,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success with no payload (deletes).
    pub fn ok() -> Self {
        ApiResponse {
            success: true,
            data: None,
            warning: None,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            warning: None,
            error: Some(message.into()),
        }
    }
}

/// Convert domain errors to HTTP responses.
pub struct AppError(SalonError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SalonError::NotFound(_) => StatusCode::NOT_FOUND,
            SalonError::Validation(_) => StatusCode::BAD_REQUEST,
            SalonError::Store(_) => StatusCode::BAD_GATEWAY,
            SalonError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (status, Json(ApiResponse::error(self.0.to_string()))).into_response()
    }
}

impl From<SalonError> for AppError {
    fn from(err: SalonError) -> Self {
        AppError(err)
    }
}
