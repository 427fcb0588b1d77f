// Errors layer - Error type definitions
pub mod api;
pub mod internal;

// Re-exports for convenience
pub use api::{ContactAccessError, ContactRequestError, NotificationError};
pub use internal::InternalError;
