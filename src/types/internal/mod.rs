// Internal types - not exposed through the API surface
pub mod audit;
pub mod auth;
pub mod consent;
pub mod directory;
