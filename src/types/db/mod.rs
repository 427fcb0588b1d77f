// Database entities - SeaORM models
pub mod application;
pub mod audit_entry;
pub mod candidate_profile;
pub mod contact_request;
pub mod job;
pub mod notification;
pub mod user;
