use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::errors::api::GateError;
use crate::errors::internal::InternalError;
use crate::types::dto::candidates::ContactFieldsView;
use crate::types::dto::common::ErrorResponse;

/// Response body for a denied contact disclosure.
///
/// Carries fixed-length placeholders so clients can render the shape of
/// the hidden fields; the real values are never fetched on this path.
#[derive(Object, Debug)]
pub struct ContactDeniedView {
    /// Error code identifier
    pub error: String,

    /// Human-readable explanation of why access was denied
    pub message: String,

    /// Masked placeholders for the private fields
    pub contact: ContactFieldsView,
}

/// Candidate contact endpoint error types
#[derive(ApiResponse, Debug)]
pub enum ContactAccessError {
    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Caller lacks the employer role
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Neither an active application nor an accepted request authorizes
    /// disclosure
    #[oai(status = 403)]
    AccessDenied(Json<ContactDeniedView>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ContactAccessError {
    /// Create an Unauthorized error
    pub fn unauthorized() -> Self {
        Self::Unauthorized(Json(ErrorResponse::new(
            "unauthorized",
            "Missing or invalid authentication token",
            401,
        )))
    }

    /// Create a Forbidden error for a caller without the employer role
    pub fn employer_role_required() -> Self {
        Self::Forbidden(Json(ErrorResponse::new(
            "employer_role_required",
            "Only employer accounts may view candidate contact data",
            403,
        )))
    }

    /// Create an AccessDenied error with masked placeholder fields
    pub fn access_denied() -> Self {
        Self::AccessDenied(Json(ContactDeniedView {
            error: "contact_access_denied".to_string(),
            message: "Contact data is only visible with an active application or after the candidate accepts a contact request".to_string(),
            contact: ContactFieldsView::masked(),
        }))
    }

    /// Convert InternalError to ContactAccessError
    ///
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        tracing::error!("Internal error in contact access operation: {}", err);
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
            Self::Forbidden(json) => json.0.message.clone(),
            Self::AccessDenied(json) => json.0.message.clone(),
            Self::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ContactAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<GateError> for ContactAccessError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Unauthorized => Self::unauthorized(),
            GateError::Internal(internal) => Self::from_internal_error(internal),
        }
    }
}
