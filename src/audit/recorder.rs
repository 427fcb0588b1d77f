use std::sync::Arc;

use crate::stores::AuditStore;
use crate::types::internal::audit::NewAuditEntry;

/// Best-effort writer for disclosure-relevant audit entries
///
/// Audit writes must never fail the business operation that triggered
/// them: a degraded audit sink is logged for operators and otherwise
/// ignored. Callers that need the write result (tests, batch jobs) use
/// `AuditStore::append` directly.
pub struct AuditRecorder {
    audit_store: Arc<AuditStore>,
}

impl AuditRecorder {
    /// Create a new AuditRecorder over the given store
    pub fn new(audit_store: Arc<AuditStore>) -> Self {
        Self { audit_store }
    }

    /// Append one audit entry, swallowing any failure
    pub async fn record(&self, entry: NewAuditEntry) {
        let action = entry.action.clone();
        if let Err(err) = self.audit_store.append(entry).await {
            tracing::error!("Failed to write audit entry for {}: {}", action, err);
        }
    }
}
