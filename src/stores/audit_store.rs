use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::errors::internal::AuditError;
use crate::errors::InternalError;
use crate::types::db::audit_entry;
use crate::types::internal::audit::NewAuditEntry;

/// Repository for audit entry storage operations
///
/// Entries are write-once; there are no update or delete operations.
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    /// Create a new AuditStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one audit entry
    ///
    /// Serializes the detail payload to JSON and inserts the entry into the
    /// audit_entries table.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if serialization or the database insert fails
    pub async fn append(&self, entry: NewAuditEntry) -> Result<(), InternalError> {
        let detail_json = serde_json::to_string(&entry.detail)
            .map_err(|e| InternalError::Audit(AuditError::from(e)))?;

        let row = audit_entry::ActiveModel {
            id: sea_orm::ActiveValue::NotSet, // Let auto-increment handle this
            timestamp: Set(Utc::now().to_rfc3339()),
            action: Set(entry.action.to_string()),
            actor_id: Set(entry.actor_id),
            subject_type: Set(entry.subject_type),
            subject_id: Set(entry.subject_id),
            detail: Set(detail_json),
            origin: Set(entry.origin),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("append_audit_entry", e))?;

        Ok(())
    }
}
