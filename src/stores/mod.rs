// Stores layer - Data access and repository pattern
pub mod audit_store;
pub mod contact_request_store;
pub mod directory_store;
pub mod notification_store;

pub use audit_store::AuditStore;
pub use contact_request_store::ContactRequestStore;
pub use directory_store::DirectoryStore;
pub use notification_store::{NotificationPage, NotificationStore};
