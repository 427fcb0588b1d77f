use thiserror::Error;

/// Domain errors of the contact consent workflow.
///
/// `RequestNotFound` deliberately covers both an unknown id and a request
/// owned by someone else, so callers cannot probe for other users'
/// requests.
#[derive(Error, Debug)]
pub enum ConsentError {
    #[error("A contact request cannot target the requesting user")]
    SelfTarget,

    #[error("Only employer accounts may request contact access")]
    NotAnEmployer,

    #[error("Employer organization is not verified")]
    EmployerNotVerified,

    #[error("Candidate not found: {0}")]
    CandidateNotFound(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("A pending contact request already exists for this candidate")]
    DuplicatePending,

    #[error("Contact request not found: {0}")]
    RequestNotFound(String),

    #[error("Contact request has already been resolved")]
    AlreadyResolved,
}
