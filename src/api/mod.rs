// API layer - HTTP endpoints
pub mod candidates;
pub mod contact_requests;
pub mod health;
pub mod notifications;

use std::net::IpAddr;
use std::sync::Arc;

use poem::Request;
use poem_openapi::auth::Bearer;
use poem_openapi::SecurityScheme;

pub use candidates::CandidatesApi;
pub use contact_requests::ContactRequestsApi;
pub use health::HealthApi;
pub use notifications::NotificationsApi;

use crate::errors::api::GateError;
use crate::services::TokenService;
use crate::stores::DirectoryStore;
use crate::types::internal::directory::Identity;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Resolves a bearer token into a directory identity
///
/// The token only proves who is calling; role and employer verification
/// come from the user directory on every request, so a stale token cannot
/// carry revoked standing.
pub struct IdentityGate {
    token_service: Arc<TokenService>,
    directory: Arc<DirectoryStore>,
}

impl IdentityGate {
    pub fn new(token_service: Arc<TokenService>, directory: Arc<DirectoryStore>) -> Self {
        Self {
            token_service,
            directory,
        }
    }

    /// Authenticate the request and load the caller's identity
    ///
    /// A token whose subject no longer exists in the directory is treated
    /// the same as an invalid token.
    pub async fn require(&self, auth: &BearerAuth) -> Result<Identity, GateError> {
        let claims = self.token_service.verify(&auth.0.token).map_err(|err| {
            tracing::debug!("Rejected bearer token: {}", err);
            GateError::Unauthorized
        })?;

        self.directory
            .find_identity(&claims.sub)
            .await
            .map_err(GateError::Internal)?
            .ok_or(GateError::Unauthorized)
    }
}

pub trait Api {
    fn extract_ip_address(&self, req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        // Fall back to remote address
        req.remote_addr()
            .as_socket_addr()
            .map(|addr| addr.ip())
    }
}
