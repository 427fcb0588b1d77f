use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::api::GateError;
use crate::errors::internal::{ConsentError, InternalError};
use crate::types::dto::common::ErrorResponse;

/// Contact request endpoint error types
#[derive(ApiResponse, Debug)]
pub enum ContactRequestError {
    /// Request is invalid for this pair of users
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Caller lacks the role or standing required for this action
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Unknown candidate, job or request
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Duplicate pending request, or transition on a resolved request
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ContactRequestError {
    /// Create a BadRequest error for a self-targeted request
    pub fn self_target() -> Self {
        Self::BadRequest(Json(ErrorResponse::new(
            "self_target",
            "You cannot request contact access to your own profile",
            400,
        )))
    }

    /// Create a Forbidden error for a caller without the employer role
    pub fn employer_role_required() -> Self {
        Self::Forbidden(Json(ErrorResponse::new(
            "employer_role_required",
            "Only employer accounts may request contact access",
            403,
        )))
    }

    /// Create a Forbidden error for an unverified employer organization
    pub fn employer_not_verified() -> Self {
        Self::Forbidden(Json(ErrorResponse::new(
            "employer_not_verified",
            "Your organization must be verified before requesting contact access",
            403,
        )))
    }

    /// Create a NotFound error for an unknown candidate
    pub fn candidate_not_found() -> Self {
        Self::NotFound(Json(ErrorResponse::new(
            "candidate_not_found",
            "Candidate not found",
            404,
        )))
    }

    /// Create a NotFound error for an unknown job
    pub fn job_not_found() -> Self {
        Self::NotFound(Json(ErrorResponse::new(
            "job_not_found",
            "Job not found",
            404,
        )))
    }

    /// Create a NotFound error for an unknown or not-owned request
    pub fn request_not_found() -> Self {
        Self::NotFound(Json(ErrorResponse::new(
            "contact_request_not_found",
            "Contact request not found",
            404,
        )))
    }

    /// Create a Conflict error for a duplicate pending request
    pub fn duplicate_pending() -> Self {
        Self::Conflict(Json(ErrorResponse::new(
            "duplicate_pending_request",
            "A pending contact request already exists for this candidate",
            409,
        )))
    }

    /// Create a Conflict error for a transition on a resolved request
    pub fn already_resolved() -> Self {
        Self::Conflict(Json(ErrorResponse::new(
            "contact_request_resolved",
            "This contact request has already been resolved",
            409,
        )))
    }

    /// Create an Unauthorized error
    pub fn unauthorized() -> Self {
        Self::Unauthorized(Json(ErrorResponse::new(
            "unauthorized",
            "Missing or invalid authentication token",
            401,
        )))
    }

    /// Convert InternalError to ContactRequestError
    ///
    /// This is the explicit conversion point from internal errors to API
    /// errors. Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Consent(consent_err) => match consent_err {
                ConsentError::SelfTarget => Self::self_target(),
                ConsentError::NotAnEmployer => Self::employer_role_required(),
                ConsentError::EmployerNotVerified => Self::employer_not_verified(),
                ConsentError::CandidateNotFound(id) => {
                    tracing::debug!("Contact request for unknown candidate: {}", id);
                    Self::candidate_not_found()
                }
                ConsentError::JobNotFound(id) => {
                    tracing::debug!("Contact request for unknown job: {}", id);
                    Self::job_not_found()
                }
                ConsentError::DuplicatePending => Self::duplicate_pending(),
                ConsentError::RequestNotFound(id) => {
                    tracing::debug!("Unknown or foreign contact request: {}", id);
                    Self::request_not_found()
                }
                ConsentError::AlreadyResolved => Self::already_resolved(),
            },
            _ => {
                tracing::error!("Internal error in contact request operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Create a generic internal server error
    ///
    /// Always returns a generic message without exposing internal details.
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
            Self::BadRequest(json) => json.0.message.clone(),
            Self::Unauthorized(json) => json.0.message.clone(),
            Self::Forbidden(json) => json.0.message.clone(),
            Self::NotFound(json) => json.0.message.clone(),
            Self::Conflict(json) => json.0.message.clone(),
            Self::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ContactRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<GateError> for ContactRequestError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Unauthorized => Self::unauthorized(),
            GateError::Internal(internal) => Self::from_internal_error(internal),
        }
    }
}
