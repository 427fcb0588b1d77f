use poem_openapi::Object;

/// Response model for the liveness endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Liveness status, "ok" while the service is answering
    pub status: String,

    /// Package name of the running service
    pub service: String,

    /// Version of the running build
    pub version: String,

    /// Time the report was produced (ISO 8601 format)
    pub timestamp: String,
}

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}
