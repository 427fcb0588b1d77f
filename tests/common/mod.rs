// Common test utilities for integration tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use talentlink_backend::api::{CandidatesApi, ContactRequestsApi, NotificationsApi};
use talentlink_backend::app_data::AppData;
use talentlink_backend::types::internal::directory::Role;

/// A fully wired application over an in-memory database
pub struct TestApp {
    pub data: AppData,
    pub contact_requests: ContactRequestsApi,
    pub candidates: CandidatesApi,
    pub notifications: NotificationsApi,
}

/// Creates a migrated in-memory application with one verified employer
/// ("employer-1") and one candidate ("candidate-1") with a contact profile
pub async fn setup_test_app() -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let data = AppData::init(
        db,
        "test-secret-key-minimum-32-characters-long".to_string(),
    );

    data.directory_store
        .insert_user(
            "employer-1",
            "Acme HR",
            Role::Employer,
            Some("Acme".to_string()),
            true,
        )
        .await
        .expect("Failed to seed employer");
    data.directory_store
        .insert_user("candidate-1", "Jane Doe", Role::Candidate, None, false)
        .await
        .expect("Failed to seed candidate");
    data.directory_store
        .upsert_contact_profile(
            "candidate-1",
            Some("+15550001111".to_string()),
            Some("https://janedoe.example".to_string()),
            Some("jane-doe-cv.pdf".to_string()),
        )
        .await
        .expect("Failed to seed contact profile");

    let contact_requests = ContactRequestsApi::new(
        data.consent_service.clone(),
        data.identity_gate.clone(),
    );
    let candidates = CandidatesApi::new(
        data.access_resolver.clone(),
        data.profile_provider.clone(),
        data.recorder.clone(),
        data.identity_gate.clone(),
    );
    let notifications = NotificationsApi::new(
        data.notification_store.clone(),
        data.identity_gate.clone(),
    );

    TestApp {
        data,
        contact_requests,
        candidates,
        notifications,
    }
}

/// Issues a bearer credential for the given seeded user
pub fn bearer(app: &TestApp, user_id: &str) -> talentlink_backend::api::BearerAuth {
    talentlink_backend::api::BearerAuth(poem_openapi::auth::Bearer {
        token: app
            .data
            .token_service
            .issue(user_id)
            .expect("Failed to issue test token"),
    })
}
