use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::api::IdentityGate;
use crate::audit::AuditRecorder;
use crate::providers::{DbProfileProvider, ProfileProvider};
use crate::realtime::{ChannelRegistry, InMemoryChannelRegistry};
use crate::services::{AccessResolver, ConsentService, TokenService};
use crate::stores::{AuditStore, ContactRequestStore, DirectoryStore, NotificationStore};

/// Centralized application wiring following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across the API
/// surfaces. Stores sit at the bottom, services compose them, and the
/// registry/provider seams stay trait objects so deployments can swap
/// them without touching the consent workflow.
pub struct AppData {
    pub db: DatabaseConnection,
    pub token_service: Arc<TokenService>,
    pub registry: Arc<dyn ChannelRegistry>,
    pub directory_store: Arc<DirectoryStore>,
    pub notification_store: Arc<NotificationStore>,
    pub profile_provider: Arc<dyn ProfileProvider>,
    pub recorder: Arc<AuditRecorder>,
    pub consent_service: Arc<ConsentService>,
    pub access_resolver: Arc<AccessResolver>,
    pub identity_gate: Arc<IdentityGate>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    pub fn init(db: DatabaseConnection, jwt_secret: String) -> Self {
        tracing::debug!("Creating stores and services...");

        let token_service = Arc::new(TokenService::new(jwt_secret));
        let registry: Arc<dyn ChannelRegistry> = Arc::new(InMemoryChannelRegistry::new());

        let contact_request_store = Arc::new(ContactRequestStore::new(db.clone()));
        let notification_store = Arc::new(NotificationStore::new(db.clone()));
        let directory_store = Arc::new(DirectoryStore::new(db.clone()));
        let audit_store = Arc::new(AuditStore::new(db.clone()));
        let recorder = Arc::new(AuditRecorder::new(audit_store));
        let profile_provider: Arc<dyn ProfileProvider> =
            Arc::new(DbProfileProvider::new(db.clone()));

        let consent_service = Arc::new(ConsentService::new(
            contact_request_store.clone(),
            notification_store.clone(),
            directory_store.clone(),
            recorder.clone(),
            registry.clone(),
        ));
        let access_resolver = Arc::new(AccessResolver::new(
            directory_store.clone(),
            contact_request_store,
        ));
        let identity_gate = Arc::new(IdentityGate::new(
            token_service.clone(),
            directory_store.clone(),
        ));

        tracing::debug!("Stores and services created");

        Self {
            db,
            token_service,
            registry,
            directory_store,
            notification_store,
            profile_provider,
            recorder,
            consent_service,
            access_resolver,
            identity_gate,
        }
    }
}
