use std::sync::Arc;

use crate::errors::InternalError;
use crate::stores::{ContactRequestStore, DirectoryStore};

/// Authorization path that granted contact disclosure.
///
/// The path is part of the decision so disclosures can be audited and
/// explained, not just permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPath {
    /// A live application relationship on one of the employer's jobs
    ActiveApplication,
    /// A contact request the candidate accepted
    AcceptedRequest,
}

impl AccessPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActiveApplication => "active-application",
            Self::AcceptedRequest => "accepted-request",
        }
    }
}

/// Outcome of an access resolution.
///
/// Carries no field values in either case: a grant is only the permission
/// to fetch them from the profile collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted { via: AccessPath },
    Denied,
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }
}

/// Decides whether an employer may see a candidate's private contact fields
///
/// Two independent paths are OR-combined, checked in a fixed order so the
/// first satisfied one names the grant: an active application relationship,
/// then an accepted contact request. Decisions are recomputed on every call;
/// nothing is cached.
pub struct AccessResolver {
    directory: Arc<DirectoryStore>,
    contact_requests: Arc<ContactRequestStore>,
}

impl AccessResolver {
    pub fn new(directory: Arc<DirectoryStore>, contact_requests: Arc<ContactRequestStore>) -> Self {
        Self {
            directory,
            contact_requests,
        }
    }

    /// Resolve disclosure over both authorization paths
    pub async fn resolve(
        &self,
        employer_id: &str,
        candidate_id: &str,
    ) -> Result<AccessDecision, InternalError> {
        if self
            .directory
            .has_active_application(employer_id, candidate_id)
            .await?
        {
            return Ok(AccessDecision::Granted {
                via: AccessPath::ActiveApplication,
            });
        }

        self.resolve_explicit(employer_id, candidate_id).await
    }

    /// Resolve disclosure over the explicit-consent path only
    pub async fn resolve_explicit(
        &self,
        employer_id: &str,
        candidate_id: &str,
    ) -> Result<AccessDecision, InternalError> {
        if self
            .contact_requests
            .has_accepted_between(employer_id, candidate_id)
            .await?
        {
            return Ok(AccessDecision::Granted {
                via: AccessPath::AcceptedRequest,
            });
        }

        Ok(AccessDecision::Denied)
    }
}
