use std::fmt;

use crate::errors::InternalError;

/// Lifecycle states of a contact request.
///
/// `Pending` is the only mutable state; `Accepted` and `Rejected` are
/// terminal. There is no path back to `Pending` and no cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ContactRequestStatus {
    /// String representation used in the database status column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a stored status column value.
    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(InternalError::Parse {
                value_type: "ContactRequestStatus".to_string(),
                message: format!("unknown status '{}'", other),
            }),
        }
    }
}

impl fmt::Display for ContactRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The candidate's resolution of a pending contact request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentDecision {
    Accept,
    Reject,
}

impl ConsentDecision {
    /// Terminal status this decision transitions the request into.
    pub fn target_status(&self) -> ContactRequestStatus {
        match self {
            Self::Accept => ContactRequestStatus::Accepted,
            Self::Reject => ContactRequestStatus::Rejected,
        }
    }
}
