//! Error types for the gateway layer

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use salon_bookings::SalonError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    AuthenticationFailed(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::DatabaseError(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side details stay in the log.
        let message = if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let error_response = json!({
            "error": status.as_str(),
            "message": message,
        });

        (status, Json(error_response)).into_response()
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code as a string, e.g. `"404"`.
    pub error: String,
    pub message: String,
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<SalonError> for GatewayError {
    fn from(error: SalonError) -> Self {
        match error {
            SalonError::NotFound { .. } => GatewayError::NotFound(error.to_string()),
            SalonError::Validation { message } => GatewayError::InvalidRequest(message),
            SalonError::Conflict { message } => GatewayError::Conflict(message),
            SalonError::AuthenticationFailed => GatewayError::AuthenticationFailed(error.to_string()),
            SalonError::Database(inner) => GatewayError::DatabaseError(inner.to_string()),
            SalonError::Internal { message } => GatewayError::InternalError(message),
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}
