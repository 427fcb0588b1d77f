use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{Api, BearerAuth, IdentityGate};
use crate::errors::api::ContactRequestError;
use crate::services::ConsentService;
use crate::types::dto::contact_requests::{
    ContactRequestStatusView, ContactRequestView, CreateContactRequestBody,
    CreateContactRequestResponse,
};
use crate::types::internal::consent::ConsentDecision;
use crate::types::internal::directory::Role;

/// Contact request API endpoints
pub struct ContactRequestsApi {
    consent_service: Arc<ConsentService>,
    gate: Arc<IdentityGate>,
}

impl ContactRequestsApi {
    /// Create a new ContactRequestsApi
    pub fn new(consent_service: Arc<ConsentService>, gate: Arc<IdentityGate>) -> Self {
        Self {
            consent_service,
            gate,
        }
    }
}

impl Api for ContactRequestsApi {}

/// API tags for contact request endpoints
#[derive(Tags)]
enum ContactRequestTags {
    /// Contact disclosure consent endpoints
    ContactRequests,
}

#[OpenApi(prefix_path = "/contact-requests")]
impl ContactRequestsApi {
    /// Ask a candidate for permission to see their contact details
    ///
    /// Employer-only. At most one pending request may exist per
    /// (employer, candidate, job) key; a duplicate is rejected with 409.
    #[oai(
        path = "/:candidate_id",
        method = "post",
        tag = "ContactRequestTags::ContactRequests"
    )]
    pub async fn create(
        &self,
        auth: BearerAuth,
        candidate_id: Path<String>,
        body: Json<CreateContactRequestBody>,
        req: &Request,
    ) -> Result<CreateContactRequestResponse, ContactRequestError> {
        let requester = self.gate.require(&auth).await?;
        let origin = self.extract_ip_address(req).map(|ip| ip.to_string());

        let request = self
            .consent_service
            .create(
                &requester,
                &candidate_id.0,
                body.0.job_id,
                body.0.message,
                origin,
            )
            .await
            .map_err(ContactRequestError::from_internal_error)?;

        Ok(CreateContactRequestResponse::Created(Json(request.into())))
    }

    /// Accept a pending contact request
    ///
    /// Only the candidate the request targets can accept it; anyone else
    /// sees the request as not found.
    #[oai(
        path = "/:request_id/accept",
        method = "post",
        tag = "ContactRequestTags::ContactRequests"
    )]
    pub async fn accept(
        &self,
        auth: BearerAuth,
        request_id: Path<String>,
        req: &Request,
    ) -> Result<Json<ContactRequestView>, ContactRequestError> {
        self.resolve(auth, request_id, ConsentDecision::Accept, req)
            .await
    }

    /// Reject a pending contact request
    #[oai(
        path = "/:request_id/reject",
        method = "post",
        tag = "ContactRequestTags::ContactRequests"
    )]
    pub async fn reject(
        &self,
        auth: BearerAuth,
        request_id: Path<String>,
        req: &Request,
    ) -> Result<Json<ContactRequestView>, ContactRequestError> {
        self.resolve(auth, request_id, ConsentDecision::Reject, req)
            .await
    }

    /// Status of the most recent contact request for a candidate
    ///
    /// Employer-only convenience query over the caller's own requests.
    #[oai(
        path = "/status/:candidate_id",
        method = "get",
        tag = "ContactRequestTags::ContactRequests"
    )]
    async fn status(
        &self,
        auth: BearerAuth,
        candidate_id: Path<String>,
    ) -> Result<Json<ContactRequestStatusView>, ContactRequestError> {
        let caller = self.gate.require(&auth).await?;
        if caller.role != Role::Employer {
            return Err(ContactRequestError::employer_role_required());
        }

        let latest = self
            .consent_service
            .status_between(&caller.id, &candidate_id.0)
            .await
            .map_err(ContactRequestError::from_internal_error)?;

        Ok(Json(match latest {
            Some(request) => ContactRequestStatusView {
                has_request: true,
                status: Some(request.status.clone()),
                request: Some(request.into()),
            },
            None => ContactRequestStatusView {
                has_request: false,
                status: None,
                request: None,
            },
        }))
    }
}

impl ContactRequestsApi {
    async fn resolve(
        &self,
        auth: BearerAuth,
        request_id: Path<String>,
        decision: ConsentDecision,
        req: &Request,
    ) -> Result<Json<ContactRequestView>, ContactRequestError> {
        let actor = self.gate.require(&auth).await?;
        let origin = self.extract_ip_address(req).map(|ip| ip.to_string());

        let updated = self
            .consent_service
            .resolve(&request_id.0, &actor, decision, origin)
            .await
            .map_err(ContactRequestError::from_internal_error)?;

        Ok(Json(updated.into()))
    }
}
