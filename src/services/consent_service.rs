use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::audit::AuditRecorder;
use crate::errors::internal::ConsentError;
use crate::errors::InternalError;
use crate::realtime::{ChannelRegistry, PushMessage};
use crate::stores::{ContactRequestStore, DirectoryStore, NotificationStore};
use crate::types::db::contact_request;
use crate::types::internal::audit::{AuditAction, NewAuditEntry};
use crate::types::internal::consent::{ConsentDecision, ContactRequestStatus};
use crate::types::internal::directory::{Identity, Role};

/// Category tag shared by every notification this workflow creates
pub const NOTIFICATION_CATEGORY: &str = "contact_request";

/// The consent state machine over contact requests
///
/// Owns the request lifecycle (create, accept, reject) and the fanout a
/// transition triggers. The side effects have distinct reliability
/// contracts: the state write commits first, the audit entry is
/// best-effort, the notification is durable and its failure propagates,
/// and the push is fired asynchronously and never awaited by the caller.
pub struct ConsentService {
    contact_requests: Arc<ContactRequestStore>,
    notifications: Arc<NotificationStore>,
    directory: Arc<DirectoryStore>,
    recorder: Arc<AuditRecorder>,
    registry: Arc<dyn ChannelRegistry>,
}

impl ConsentService {
    pub fn new(
        contact_requests: Arc<ContactRequestStore>,
        notifications: Arc<NotificationStore>,
        directory: Arc<DirectoryStore>,
        recorder: Arc<AuditRecorder>,
        registry: Arc<dyn ChannelRegistry>,
    ) -> Self {
        Self {
            contact_requests,
            notifications,
            directory,
            recorder,
            registry,
        }
    }

    /// Create a pending contact request from an employer to a candidate
    ///
    /// # Errors
    ///
    /// `ConsentError::SelfTarget` when the employer targets themselves,
    /// `NotAnEmployer`/`EmployerNotVerified` when the requester lacks
    /// standing, `CandidateNotFound`/`JobNotFound` for unknown references,
    /// and `DuplicatePending` when a live request already exists for the
    /// same (employer, candidate, job) key.
    pub async fn create(
        &self,
        requester: &Identity,
        candidate_id: &str,
        job_id: Option<String>,
        message: Option<String>,
        origin: Option<String>,
    ) -> Result<contact_request::Model, InternalError> {
        if requester.id == candidate_id {
            return Err(ConsentError::SelfTarget.into());
        }
        if requester.role != Role::Employer {
            return Err(ConsentError::NotAnEmployer.into());
        }
        if !requester.org_verified {
            return Err(ConsentError::EmployerNotVerified.into());
        }

        let candidate = self
            .directory
            .find_identity(candidate_id)
            .await?
            .filter(|identity| identity.role == Role::Candidate)
            .ok_or_else(|| ConsentError::CandidateNotFound(candidate_id.to_string()))?;

        if let Some(job_id) = &job_id {
            if !self.directory.job_owned_by(job_id, &requester.id).await? {
                return Err(ConsentError::JobNotFound(job_id.clone()).into());
            }
        }

        // The store's unique index decides concurrent duplicates; there is
        // deliberately no pre-check here
        let request = self
            .contact_requests
            .insert_pending(&requester.id, candidate_id, job_id, message)
            .await?;

        self.recorder
            .record(
                NewAuditEntry::new(
                    AuditAction::ContactRequestCreated,
                    "contact_request",
                    &request.id,
                )
                .actor(&requester.id)
                .detail(json!({
                    "candidate_id": request.candidate_id,
                    "job_id": request.job_id,
                }))
                .origin(origin),
            )
            .await;

        self.notifications
            .create(
                candidate_id,
                "New contact request",
                &format!(
                    "{} would like to see your contact details",
                    requester.display_name
                ),
                NOTIFICATION_CATEGORY,
                Some(request.id.clone()),
            )
            .await?;

        self.push(
            &candidate.id,
            PushMessage {
                title: "New contact request".to_string(),
                message: format!(
                    "{} would like to see your contact details",
                    requester.display_name
                ),
                kind: "contact_request_created".to_string(),
            },
        );

        Ok(request)
    }

    /// Resolve a pending request with the candidate's decision
    ///
    /// # Errors
    ///
    /// `ConsentError::RequestNotFound` when the id is unknown or the actor
    /// is not the request's candidate (the two are indistinguishable to the
    /// caller), `AlreadyResolved` when the request has left the pending
    /// state, including when this call loses a race for the transition.
    pub async fn resolve(
        &self,
        request_id: &str,
        actor: &Identity,
        decision: ConsentDecision,
        origin: Option<String>,
    ) -> Result<contact_request::Model, InternalError> {
        let request = self
            .contact_requests
            .find_by_id(request_id)
            .await?
            .filter(|request| request.candidate_id == actor.id)
            .ok_or_else(|| ConsentError::RequestNotFound(request_id.to_string()))?;

        if ContactRequestStatus::parse(&request.status)? != ContactRequestStatus::Pending {
            return Err(ConsentError::AlreadyResolved.into());
        }

        // Conditional update: of two concurrent resolutions exactly one
        // moves the row, the other sees zero rows affected
        let now = Utc::now().timestamp_millis();
        let moved = self
            .contact_requests
            .transition(request_id, &actor.id, decision.target_status(), now)
            .await?;
        if moved == 0 {
            return Err(ConsentError::AlreadyResolved.into());
        }

        let updated = contact_request::Model {
            status: decision.target_status().as_str().to_string(),
            updated_at: now,
            ..request
        };

        let (action, verb, kind) = match decision {
            ConsentDecision::Accept => (
                AuditAction::ContactRequestAccepted,
                "accepted",
                "contact_request_accepted",
            ),
            ConsentDecision::Reject => (
                AuditAction::ContactRequestRejected,
                "rejected",
                "contact_request_rejected",
            ),
        };

        self.recorder
            .record(
                NewAuditEntry::new(action, "contact_request", request_id)
                    .actor(&actor.id)
                    .detail(json!({ "employer_id": updated.employer_id }))
                    .origin(origin),
            )
            .await;

        let title = format!("Contact request {}", verb);
        let body = format!("{} {} your contact request", actor.display_name, verb);
        self.notifications
            .create(
                &updated.employer_id,
                &title,
                &body,
                NOTIFICATION_CATEGORY,
                Some(updated.id.clone()),
            )
            .await?;

        self.push(
            &updated.employer_id,
            PushMessage {
                title,
                message: body,
                kind: kind.to_string(),
            },
        );

        Ok(updated)
    }

    /// Most recently created request between an employer and a candidate
    pub async fn status_between(
        &self,
        employer_id: &str,
        candidate_id: &str,
    ) -> Result<Option<contact_request::Model>, InternalError> {
        self.contact_requests
            .latest_between(employer_id, candidate_id)
            .await
    }

    /// Fire a best-effort push without blocking the caller
    fn push(&self, recipient: &str, message: PushMessage) {
        let registry = self.registry.clone();
        let recipient = recipient.to_string();
        tokio::spawn(async move {
            let delivered = registry.deliver(&recipient, message).await;
            tracing::debug!("Pushed to {} live connection(s) of {}", delivered, recipient);
        });
    }
}
