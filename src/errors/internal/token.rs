use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("Failed to issue token: {0}")]
    Issue(#[source] jsonwebtoken::errors::Error),
}
