use serde::{Deserialize, Serialize};

/// Claims carried in a marketplace access token.
///
/// Only the subject is trusted; role and verification flags are resolved
/// from the user directory on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}
