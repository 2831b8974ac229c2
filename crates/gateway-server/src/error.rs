//! HTTP error mapping.
//!
//! Every failure leaves the gateway as the shared envelope shape with
//! `success: false` and a short description, plus the status code the error
//! taxonomy assigns. Raw diagnostic detail never reaches callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use gateway_core::{ChatEnvelope, GatewayError};

use crate::auth::AuthError;

/// An error ready to be rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status to return.
    pub status: StatusCode,
    /// Human-readable, non-sensitive description.
    pub message: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        let status = match &error {
            GatewayError::InvalidInput(_)
            | GatewayError::UnsupportedMediaType(_)
            | GatewayError::PayloadTooLarge(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            GatewayError::DownstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::DownstreamTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
            GatewayError::DownstreamError { .. } | GatewayError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, error.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self::unauthorized(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ChatEnvelope::failure(self.message);
        (self.status, Json(body)).into_response()
    }
}
