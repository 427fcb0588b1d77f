use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

/// Process-level settings, loaded once at startup
///
/// Everything else (log level, log file) is read by the logging module
/// directly.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: String,
}

impl AppSettings {
    /// Load settings from environment variables
    ///
    /// `DATABASE_URL` and `BIND_ADDRESS` have development defaults;
    /// `JWT_SECRET` is required because a defaulted signing secret would
    /// silently accept forged identity tokens.
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://talentlink.db?mode=rwc".to_string());
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| SettingsError::Missing("JWT_SECRET"))?;
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            bind_address,
        })
    }
}
