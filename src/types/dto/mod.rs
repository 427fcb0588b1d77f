// DTO layer - API request/response models
pub mod candidates;
pub mod common;
pub mod contact_requests;
pub mod notifications;
