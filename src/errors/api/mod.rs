// API-facing error types
pub mod candidates;
pub mod contact_requests;
pub mod notifications;

// Re-exports for convenience
pub use candidates::ContactAccessError;
pub use contact_requests::ContactRequestError;
pub use notifications::NotificationError;

use crate::errors::internal::InternalError;

/// Failure modes of request identity resolution.
///
/// Produced by the shared identity gate and mapped by each endpoint group
/// into its own response type via `From`.
#[derive(Debug)]
pub enum GateError {
    /// Token missing, invalid, expired, or subject no longer exists
    Unauthorized,

    /// Infrastructure failure while resolving the identity
    Internal(InternalError),
}
