use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::api::GateError;
use crate::errors::internal::InternalError;
use crate::types::dto::common::ErrorResponse;

/// Notification endpoint error types
#[derive(ApiResponse, Debug)]
pub enum NotificationError {
    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Unknown notification, or one addressed to a different recipient
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl NotificationError {
    /// Create an Unauthorized error
    pub fn unauthorized() -> Self {
        Self::Unauthorized(Json(ErrorResponse::new(
            "unauthorized",
            "Missing or invalid authentication token",
            401,
        )))
    }

    /// Create a NotFound error for an unknown or foreign notification
    pub fn not_found() -> Self {
        Self::NotFound(Json(ErrorResponse::new(
            "notification_not_found",
            "Notification not found",
            404,
        )))
    }

    /// Convert InternalError to NotificationError
    ///
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        tracing::error!("Internal error in notification operation: {}", err);
        Self::internal_server_error()
    }

    fn internal_server_error() -> Self {
        Self::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized(json) => json.0.message.clone(),
            Self::NotFound(json) => json.0.message.clone(),
            Self::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for NotificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<GateError> for NotificationError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Unauthorized => Self::unauthorized(),
            GateError::Internal(internal) => Self::from_internal_error(internal),
        }
    }
}
