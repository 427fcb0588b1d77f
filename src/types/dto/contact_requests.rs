use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::types::db::contact_request;

/// Request model for creating a contact request
#[derive(Object, Debug)]
pub struct CreateContactRequestBody {
    /// Job the request is scoped to, if any
    pub job_id: Option<String>,

    /// Optional message shown to the candidate (max 500 characters)
    #[oai(validator(max_length = 500))]
    pub message: Option<String>,
}

/// Response model representing a contact request
#[derive(Object, Debug)]
pub struct ContactRequestView {
    /// Unique identifier of the request
    pub id: String,

    /// Employer who asked for contact access
    pub employer_id: String,

    /// Candidate whose contact data was requested
    pub candidate_id: String,

    /// Job the request is scoped to, if any
    pub job_id: Option<String>,

    /// Message supplied by the employer
    pub message: Option<String>,

    /// Current status: "pending", "accepted" or "rejected"
    pub status: String,

    /// Creation time (Unix milliseconds)
    pub created_at: i64,

    /// Time of the last status change (Unix milliseconds)
    pub updated_at: i64,
}

impl From<contact_request::Model> for ContactRequestView {
    fn from(model: contact_request::Model) -> Self {
        Self {
            id: model.id,
            employer_id: model.employer_id,
            candidate_id: model.candidate_id,
            job_id: model.job_id,
            message: model.message,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Response model for the pair status query
#[derive(Object, Debug)]
pub struct ContactRequestStatusView {
    /// Whether any request exists between the pair
    pub has_request: bool,

    /// Status of the most recent request, if any
    pub status: Option<String>,

    /// The most recent request, if any
    pub request: Option<ContactRequestView>,
}

/// API response for contact request creation
#[derive(ApiResponse)]
pub enum CreateContactRequestResponse {
    /// Contact request created and pending the candidate's decision
    #[oai(status = 201)]
    Created(Json<ContactRequestView>),
}
