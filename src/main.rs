use poem::{get, listener::TcpListener, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;

use talentlink_backend::api::{CandidatesApi, ContactRequestsApi, HealthApi, NotificationsApi};
use talentlink_backend::app_data::AppData;
use talentlink_backend::config::{self, AppSettings};
use talentlink_backend::errors::InternalError;
use talentlink_backend::realtime::{notification_channel, RealtimeState};
use talentlink_backend::types::internal::directory::{ApplicationStatus, Role};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();

    config::init_logging().expect("Failed to initialize logging");

    let settings = AppSettings::from_env().expect("Failed to load settings");

    let db = config::init_database(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    config::migrate(&db).await.expect("Failed to run migrations");

    let app_data = AppData::init(db, settings.jwt_secret.clone());

    if std::env::var("SEED_DEMO_DATA").is_ok() {
        if let Err(err) = seed_demo_data(&app_data).await {
            tracing::warn!("Demo data seeding failed: {}", err);
        }
    }

    let api_service = OpenApiService::new(
        (
            HealthApi,
            ContactRequestsApi::new(
                app_data.consent_service.clone(),
                app_data.identity_gate.clone(),
            ),
            CandidatesApi::new(
                app_data.access_resolver.clone(),
                app_data.profile_provider.clone(),
                app_data.recorder.clone(),
                app_data.identity_gate.clone(),
            ),
            NotificationsApi::new(
                app_data.notification_store.clone(),
                app_data.identity_gate.clone(),
            ),
        ),
        "TalentLink API",
        "1.0.0",
    )
    .server(format!("http://{}/api", settings.bind_address));

    let ui = api_service.swagger_ui();

    let realtime_state = RealtimeState {
        token_service: app_data.token_service.clone(),
        registry: app_data.registry.clone(),
    };

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .at("/ws/notifications", get(notification_channel))
        .data(realtime_state);

    tracing::info!("Starting server on http://{}", settings.bind_address);
    tracing::info!("Swagger UI available under /swagger");

    Server::new(TcpListener::bind(settings.bind_address))
        .run(app)
        .await
}

/// Seed a demo employer/candidate pair for local development
///
/// Idempotent: an already-seeded database is left untouched.
async fn seed_demo_data(app_data: &AppData) -> Result<(), InternalError> {
    let directory = &app_data.directory_store;

    if directory.find_identity("demo-employer").await?.is_some() {
        tracing::debug!("Demo data already present, skipping seeding");
        return Ok(());
    }

    directory
        .insert_user(
            "demo-employer",
            "Acme HR",
            Role::Employer,
            Some("Acme Corp".to_string()),
            true,
        )
        .await?;
    directory
        .insert_user("demo-candidate", "Jane Doe", Role::Candidate, None, false)
        .await?;
    directory
        .insert_job("demo-job", "demo-employer", "Backend Engineer")
        .await?;
    directory
        .insert_application(
            "demo-application",
            "demo-job",
            "demo-candidate",
            ApplicationStatus::Reviewing,
        )
        .await?;
    directory
        .upsert_contact_profile(
            "demo-candidate",
            Some("+15550001111".to_string()),
            Some("https://janedoe.example".to_string()),
            Some("jane-doe-cv.pdf".to_string()),
        )
        .await?;

    match app_data.token_service.issue("demo-employer") {
        Ok(token) => tracing::info!("Demo employer token: {}", token),
        Err(err) => tracing::warn!("Could not issue demo token: {}", err),
    }

    tracing::info!("Demo data seeded");
    Ok(())
}
