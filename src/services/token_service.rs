use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::errors::internal::TokenError;
use crate::types::internal::auth::Claims;

/// Verifies marketplace identity tokens
///
/// Tokens are issued by the external authentication collaborator; this
/// service only validates them. `issue` exists for dev seeding and tests,
/// which need to mint tokens without that collaborator running.
pub struct TokenService {
    jwt_secret: String,
    token_lifetime_minutes: i64,
}

impl TokenService {
    /// Create a new TokenService with the given JWT secret
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            token_lifetime_minutes: 60,
        }
    }

    /// Validate a bearer token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for an expired token and
    /// `TokenError::Invalid` for any other validation failure.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e),
        })
    }

    /// Issue a token for the given user id
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.token_lifetime_minutes * 60,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(TokenError::Issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-minimum-32-characters-long".to_string())
    }

    #[test]
    fn test_issued_token_verifies() {
        let service = service();

        let token = service.issue("user-1").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let service = service();
        assert!(matches!(
            service.verify("not-a-jwt"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_token_from_another_secret_is_rejected() {
        let issuer = TokenService::new("one-secret-key-minimum-32-characters-long".to_string());
        let verifier = TokenService::new("other-secret-key-minimum-32-characters-x".to_string());

        let token = issuer.issue("user-1").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let service = service();

        let claims = Claims {
            sub: "user-1".to_string(),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret-key-minimum-32-characters-long".as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }
}
