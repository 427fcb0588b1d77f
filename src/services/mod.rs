// Services layer - Business logic and orchestration
pub mod access_resolver;
pub mod consent_service;
pub mod token_service;

pub use access_resolver::{AccessDecision, AccessPath, AccessResolver};
pub use consent_service::ConsentService;
pub use token_service::TokenService;
