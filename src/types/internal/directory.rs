use std::fmt;

use crate::errors::InternalError;
use crate::types::db::user;

/// Marketplace roles. The directory is the source of truth; roles are never
/// trusted from token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Candidate,
    Employer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Employer => "employer",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value {
            "candidate" => Ok(Self::Candidate),
            "employer" => Ok(Self::Employer),
            other => Err(InternalError::Parse {
                value_type: "Role".to_string(),
                message: format!("unknown role '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved identity of an authenticated user.
///
/// `org_verified` is only meaningful when `role` is `Employer`.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub role: Role,
    pub org_verified: bool,
}

impl TryFrom<user::Model> for Identity {
    type Error = InternalError;

    fn try_from(model: user::Model) -> Result<Self, Self::Error> {
        Ok(Identity {
            role: Role::parse(&model.role)?,
            id: model.id,
            display_name: model.display_name,
            org_verified: model.org_verified,
        })
    }
}

/// Hiring-pipeline stages of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Interview,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewing => "reviewing",
            Self::Interview => "interview",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Stages in which the employer/candidate relationship is live.
    ///
    /// Only these grant implicit contact access; closed applications
    /// (accepted, rejected, withdrawn) do not.
    pub fn active_stages() -> [&'static str; 3] {
        [
            Self::Pending.as_str(),
            Self::Reviewing.as_str(),
            Self::Interview.as_str(),
        ]
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
