use std::fmt;

/// Action tags for audit entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditAction {
    ContactRequestCreated,
    ContactRequestAccepted,
    ContactRequestRejected,
    ContactDisclosed,
    ContactDisclosureDenied,
    Custom(String),
}

impl AuditAction {
    /// Convert AuditAction to string representation for database storage
    pub fn as_str(&self) -> &str {
        match self {
            Self::ContactRequestCreated => "contact_request_created",
            Self::ContactRequestAccepted => "contact_request_accepted",
            Self::ContactRequestRejected => "contact_request_rejected",
            Self::ContactDisclosed => "contact_disclosed",
            Self::ContactDisclosureDenied => "contact_disclosure_denied",
            Self::Custom(s) => s.as_str(),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for AuditAction {
    fn from(s: &str) -> Self {
        AuditAction::Custom(s.to_string())
    }
}

/// One audit fact, ready to append.
///
/// `actor_id` is None for system-originated entries. `detail` is an
/// arbitrary JSON payload stored as text.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub action: AuditAction,
    pub actor_id: Option<String>,
    pub subject_type: String,
    pub subject_id: String,
    pub detail: serde_json::Value,
    pub origin: Option<String>,
}

impl NewAuditEntry {
    pub fn new(
        action: AuditAction,
        subject_type: impl Into<String>,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            action,
            actor_id: None,
            subject_type: subject_type.into(),
            subject_id: subject_id.into(),
            detail: serde_json::Value::Null,
            origin: None,
        }
    }

    pub fn actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    pub fn detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = detail;
        self
    }

    pub fn origin(mut self, origin: Option<String>) -> Self {
        self.origin = origin;
        self
    }
}
