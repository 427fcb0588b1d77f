use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use serde_json::json;

use crate::api::{Api, BearerAuth, IdentityGate};
use crate::audit::AuditRecorder;
use crate::errors::api::ContactAccessError;
use crate::providers::{ContactFields, ProfileProvider};
use crate::services::{AccessDecision, AccessPath, AccessResolver};
use crate::types::dto::candidates::{
    ContactByRequestView, ContactDisclosureView, ContactFieldsView,
};
use crate::types::internal::audit::{AuditAction, NewAuditEntry};
use crate::types::internal::directory::{Identity, Role};

/// Candidate contact disclosure API endpoints
///
/// The resolver decides; only a granted decision is followed by a fetch
/// from the profile provider. On a denial no real value ever leaves the
/// provider, so nothing private can leak through logs or error payloads.
pub struct CandidatesApi {
    resolver: Arc<AccessResolver>,
    profiles: Arc<dyn ProfileProvider>,
    recorder: Arc<AuditRecorder>,
    gate: Arc<IdentityGate>,
}

impl CandidatesApi {
    /// Create a new CandidatesApi
    pub fn new(
        resolver: Arc<AccessResolver>,
        profiles: Arc<dyn ProfileProvider>,
        recorder: Arc<AuditRecorder>,
        gate: Arc<IdentityGate>,
    ) -> Self {
        Self {
            resolver,
            profiles,
            recorder,
            gate,
        }
    }
}

impl Api for CandidatesApi {}

/// API tags for candidate contact endpoints
#[derive(Tags)]
enum CandidateTags {
    /// Candidate contact disclosure endpoints
    Candidates,
}

#[OpenApi(prefix_path = "/candidates")]
impl CandidatesApi {
    /// A candidate's contact details, if the caller is authorized
    ///
    /// Checks both authorization paths: an active application on one of the
    /// employer's jobs, then an accepted contact request. When neither
    /// grants access the response carries masked placeholders only.
    #[oai(
        path = "/:candidate_id/contact",
        method = "get",
        tag = "CandidateTags::Candidates"
    )]
    pub async fn contact(
        &self,
        auth: BearerAuth,
        candidate_id: Path<String>,
        req: &Request,
    ) -> Result<Json<ContactDisclosureView>, ContactAccessError> {
        let caller = self.gate.require(&auth).await?;
        if caller.role != Role::Employer {
            return Err(ContactAccessError::employer_role_required());
        }

        let decision = self
            .resolver
            .resolve(&caller.id, &candidate_id.0)
            .await
            .map_err(ContactAccessError::from_internal_error)?;

        let AccessDecision::Granted { via } = decision else {
            self.audit_denied(&caller, &candidate_id.0, req).await;
            return Err(ContactAccessError::access_denied());
        };

        let fields = self.disclose(&caller, &candidate_id.0, via, req).await?;
        Ok(Json(ContactDisclosureView {
            contact: fields,
            via: via.as_str().to_string(),
        }))
    }

    /// Contact details gated on an accepted contact request only
    ///
    /// Unlike the combined endpoint this one reports a denial as a normal
    /// response, so clients can render a "request contact" affordance.
    #[oai(
        path = "/:candidate_id/contact-by-request",
        method = "get",
        tag = "CandidateTags::Candidates"
    )]
    pub async fn contact_by_request(
        &self,
        auth: BearerAuth,
        candidate_id: Path<String>,
        req: &Request,
    ) -> Result<Json<ContactByRequestView>, ContactAccessError> {
        let caller = self.gate.require(&auth).await?;
        if caller.role != Role::Employer {
            return Err(ContactAccessError::employer_role_required());
        }

        let decision = self
            .resolver
            .resolve_explicit(&caller.id, &candidate_id.0)
            .await
            .map_err(ContactAccessError::from_internal_error)?;

        let AccessDecision::Granted { via } = decision else {
            return Ok(Json(ContactByRequestView {
                has_access: false,
                contact: None,
            }));
        };

        let fields = self.disclose(&caller, &candidate_id.0, via, req).await?;
        Ok(Json(ContactByRequestView {
            has_access: true,
            contact: Some(fields),
        }))
    }
}

impl CandidatesApi {
    /// Fetch the real fields and record the disclosure
    async fn disclose(
        &self,
        caller: &Identity,
        candidate_id: &str,
        via: AccessPath,
        req: &Request,
    ) -> Result<ContactFieldsView, ContactAccessError> {
        let fields = self
            .profiles
            .contact_fields(candidate_id)
            .await
            .map_err(ContactAccessError::from_internal_error)?;

        self.recorder
            .record(
                NewAuditEntry::new(AuditAction::ContactDisclosed, "candidate_contact", candidate_id)
                    .actor(&caller.id)
                    .detail(json!({ "via": via.as_str() }))
                    .origin(self.extract_ip_address(req).map(|ip| ip.to_string())),
            )
            .await;

        let ContactFields {
            phone,
            portfolio_url,
            cv_reference,
        } = fields;
        Ok(ContactFieldsView {
            phone,
            portfolio_url,
            cv_reference,
        })
    }

    async fn audit_denied(&self, caller: &Identity, candidate_id: &str, req: &Request) {
        self.recorder
            .record(
                NewAuditEntry::new(
                    AuditAction::ContactDisclosureDenied,
                    "candidate_contact",
                    candidate_id,
                )
                .actor(&caller.id)
                .origin(self.extract_ip_address(req).map(|ip| ip.to_string())),
            )
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::DbProfileProvider;
    use crate::realtime::InMemoryChannelRegistry;
    use crate::services::{ConsentService, TokenService};
    use crate::stores::{AuditStore, ContactRequestStore, DirectoryStore, NotificationStore};
    use crate::types::db::audit_entry;
    use crate::types::internal::consent::ConsentDecision;
    use crate::types::internal::directory::ApplicationStatus;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use sea_orm::{ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter};

    struct Harness {
        db: DatabaseConnection,
        api: CandidatesApi,
        directory: Arc<DirectoryStore>,
        consent_service: Arc<ConsentService>,
        token_service: Arc<TokenService>,
    }

    async fn setup() -> Harness {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let directory = Arc::new(DirectoryStore::new(db.clone()));
        let contact_requests = Arc::new(ContactRequestStore::new(db.clone()));
        let notifications = Arc::new(NotificationStore::new(db.clone()));
        let recorder = Arc::new(AuditRecorder::new(Arc::new(AuditStore::new(db.clone()))));
        let registry = Arc::new(InMemoryChannelRegistry::new());
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));

        let resolver = Arc::new(AccessResolver::new(
            directory.clone(),
            contact_requests.clone(),
        ));
        let consent_service = Arc::new(ConsentService::new(
            contact_requests,
            notifications,
            directory.clone(),
            recorder.clone(),
            registry,
        ));
        let gate = Arc::new(IdentityGate::new(token_service.clone(), directory.clone()));
        let profiles: Arc<dyn ProfileProvider> = Arc::new(DbProfileProvider::new(db.clone()));

        directory
            .insert_user(
                "employer-1",
                "Acme HR",
                Role::Employer,
                Some("Acme".to_string()),
                true,
            )
            .await
            .unwrap();
        directory
            .insert_user("candidate-1", "Jane Doe", Role::Candidate, None, false)
            .await
            .unwrap();
        directory
            .upsert_contact_profile(
                "candidate-1",
                Some("+15550001111".to_string()),
                Some("https://portfolio.example".to_string()),
                Some("cv-1.pdf".to_string()),
            )
            .await
            .unwrap();

        Harness {
            db,
            api: CandidatesApi::new(resolver, profiles, recorder, gate),
            directory,
            consent_service,
            token_service,
        }
    }

    fn bearer(harness: &Harness, user_id: &str) -> BearerAuth {
        BearerAuth(Bearer {
            token: harness.token_service.issue(user_id).unwrap(),
        })
    }

    fn employer_identity() -> Identity {
        Identity {
            id: "employer-1".to_string(),
            display_name: "Acme HR".to_string(),
            role: Role::Employer,
            org_verified: true,
        }
    }

    fn candidate_identity() -> Identity {
        Identity {
            id: "candidate-1".to_string(),
            display_name: "Jane Doe".to_string(),
            role: Role::Candidate,
            org_verified: false,
        }
    }

    fn http_request() -> Request {
        Request::builder().finish()
    }

    #[tokio::test]
    async fn test_contact_is_denied_without_any_relationship() {
        let harness = setup().await;

        let result = harness
            .api
            .contact(
                bearer(&harness, "employer-1"),
                Path("candidate-1".to_string()),
                &http_request(),
            )
            .await;

        match result {
            Err(ContactAccessError::AccessDenied(Json(denied))) => {
                // Placeholders only, shaped like the real payload
                assert_eq!(denied.contact.phone.as_deref(), Some("********"));
                assert_eq!(denied.contact.portfolio_url.as_deref(), Some("********"));
            }
            other => panic!("Expected AccessDenied, got {:?}", other.map(|_| ())),
        }

        let denials = audit_entry::Entity::find()
            .filter(audit_entry::Column::Action.eq("contact_disclosure_denied"))
            .all(&harness.db)
            .await
            .unwrap();
        assert_eq!(denials.len(), 1);
    }

    #[tokio::test]
    async fn test_active_application_disclosed_without_a_request() {
        let harness = setup().await;
        harness
            .directory
            .insert_job("job-1", "employer-1", "Backend Engineer")
            .await
            .unwrap();
        harness
            .directory
            .insert_application("app-1", "job-1", "candidate-1", ApplicationStatus::Interview)
            .await
            .unwrap();

        let view = harness
            .api
            .contact(
                bearer(&harness, "employer-1"),
                Path("candidate-1".to_string()),
                &http_request(),
            )
            .await
            .unwrap();

        assert_eq!(view.0.via, "active-application");
        assert_eq!(view.0.contact.phone, Some("+15550001111".to_string()));

        let disclosures = audit_entry::Entity::find()
            .filter(audit_entry::Column::Action.eq("contact_disclosed"))
            .all(&harness.db)
            .await
            .unwrap();
        assert_eq!(disclosures.len(), 1);
        assert!(disclosures[0].detail.contains("active-application"));
    }

    #[tokio::test]
    async fn test_contact_by_request_tracks_the_consent_decision() {
        let harness = setup().await;

        // No request yet: no access, and that is a normal response
        let view = harness
            .api
            .contact_by_request(
                bearer(&harness, "employer-1"),
                Path("candidate-1".to_string()),
                &http_request(),
            )
            .await
            .unwrap();
        assert!(!view.0.has_access);
        assert!(view.0.contact.is_none());

        let request = harness
            .consent_service
            .create(&employer_identity(), "candidate-1", None, None, None)
            .await
            .unwrap();
        harness
            .consent_service
            .resolve(&request.id, &candidate_identity(), ConsentDecision::Accept, None)
            .await
            .unwrap();

        let view = harness
            .api
            .contact_by_request(
                bearer(&harness, "employer-1"),
                Path("candidate-1".to_string()),
                &http_request(),
            )
            .await
            .unwrap();
        assert!(view.0.has_access);
        let contact = view.0.contact.unwrap();
        assert_eq!(contact.phone, Some("+15550001111".to_string()));
        assert_eq!(contact.cv_reference, Some("cv-1.pdf".to_string()));
    }

    #[tokio::test]
    async fn test_contact_by_request_ignores_the_application_path() {
        let harness = setup().await;
        harness
            .directory
            .insert_job("job-1", "employer-1", "Backend Engineer")
            .await
            .unwrap();
        harness
            .directory
            .insert_application("app-1", "job-1", "candidate-1", ApplicationStatus::Pending)
            .await
            .unwrap();

        let view = harness
            .api
            .contact_by_request(
                bearer(&harness, "employer-1"),
                Path("candidate-1".to_string()),
                &http_request(),
            )
            .await
            .unwrap();
        assert!(!view.0.has_access);
    }

    #[tokio::test]
    async fn test_rejected_request_does_not_disclose() {
        let harness = setup().await;

        let request = harness
            .consent_service
            .create(&employer_identity(), "candidate-1", None, None, None)
            .await
            .unwrap();
        harness
            .consent_service
            .resolve(&request.id, &candidate_identity(), ConsentDecision::Reject, None)
            .await
            .unwrap();

        let view = harness
            .api
            .contact_by_request(
                bearer(&harness, "employer-1"),
                Path("candidate-1".to_string()),
                &http_request(),
            )
            .await
            .unwrap();
        assert!(!view.0.has_access);

        let result = harness
            .api
            .contact(
                bearer(&harness, "employer-1"),
                Path("candidate-1".to_string()),
                &http_request(),
            )
            .await;
        assert!(matches!(result, Err(ContactAccessError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn test_contact_endpoints_are_employer_only() {
        let harness = setup().await;

        let result = harness
            .api
            .contact(
                bearer(&harness, "candidate-1"),
                Path("candidate-1".to_string()),
                &http_request(),
            )
            .await;
        assert!(matches!(result, Err(ContactAccessError::Forbidden(_))));

        let result = harness
            .api
            .contact_by_request(
                bearer(&harness, "candidate-1"),
                Path("candidate-1".to_string()),
                &http_request(),
            )
            .await;
        assert!(matches!(result, Err(ContactAccessError::Forbidden(_))));
    }
}
