use chrono::Utc;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::types::dto::common::HealthResponse;

/// Service liveness API
pub struct HealthApi;

/// API tags for liveness endpoints
#[derive(Tags)]
enum HealthTags {
    /// Service liveness endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Liveness report
    ///
    /// Identifies the answering service and build so deployment checks can
    /// tell which version is live behind a load balancer.
    #[oai(path = "/health", method = "get", tag = "HealthTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_identifies_the_running_service_and_build() {
        let response = HealthApi.health().await;

        assert_eq!(response.0.status, "ok");
        assert_eq!(response.0.service, "talentlink-backend");
        assert_eq!(response.0.version, env!("CARGO_PKG_VERSION"));
        assert!(!response.0.timestamp.is_empty());
    }
}
