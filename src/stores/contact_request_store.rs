use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::internal::ConsentError;
use crate::errors::InternalError;
use crate::types::db::contact_request::{self, Entity as ContactRequest};
use crate::types::internal::consent::ContactRequestStatus;

/// Repository for contact request storage operations
///
/// The "at most one pending request per (employer, candidate, job) key"
/// invariant is enforced by a partial unique index, so two concurrent
/// inserts for the same key are decided by the storage engine rather than
/// by an application-level check.
pub struct ContactRequestStore {
    db: DatabaseConnection,
}

impl ContactRequestStore {
    /// Create a new ContactRequestStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new pending contact request
    ///
    /// # Errors
    ///
    /// Returns `ConsentError::DuplicatePending` (wrapped in `InternalError`)
    /// when a pending request already exists for the same
    /// (employer, candidate, job) key, and a database error otherwise.
    pub async fn insert_pending(
        &self,
        employer_id: &str,
        candidate_id: &str,
        job_id: Option<String>,
        message: Option<String>,
    ) -> Result<contact_request::Model, InternalError> {
        let now = Utc::now().timestamp_millis();

        let request = contact_request::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            employer_id: Set(employer_id.to_string()),
            candidate_id: Set(candidate_id.to_string()),
            job_id: Set(job_id),
            message: Set(message),
            status: Set(ContactRequestStatus::Pending.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        request.insert(&self.db).await.map_err(|e| {
            // The partial unique index rejects a second pending row for the key
            if e.to_string().contains("UNIQUE") {
                InternalError::Consent(ConsentError::DuplicatePending)
            } else {
                InternalError::database("insert_contact_request", e)
            }
        })
    }

    /// Find a contact request by id
    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<contact_request::Model>, InternalError> {
        ContactRequest::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_contact_request", e))
    }

    /// Conditionally move a pending request into a terminal state
    ///
    /// The update only applies while the row is still pending and owned by
    /// `candidate_id`, so two concurrent resolution attempts produce exactly
    /// one winner. Returns the number of rows changed: 1 when this call won
    /// the transition, 0 when the row is missing, foreign, or resolved.
    pub async fn transition(
        &self,
        id: &str,
        candidate_id: &str,
        to: ContactRequestStatus,
        now_millis: i64,
    ) -> Result<u64, InternalError> {
        let result = ContactRequest::update_many()
            .col_expr(contact_request::Column::Status, Expr::value(to.as_str()))
            .col_expr(contact_request::Column::UpdatedAt, Expr::value(now_millis))
            .filter(contact_request::Column::Id.eq(id))
            .filter(contact_request::Column::CandidateId.eq(candidate_id))
            .filter(
                contact_request::Column::Status.eq(ContactRequestStatus::Pending.as_str()),
            )
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("transition_contact_request", e))?;

        Ok(result.rows_affected)
    }

    /// Most recently created request between a pair, regardless of job key
    pub async fn latest_between(
        &self,
        employer_id: &str,
        candidate_id: &str,
    ) -> Result<Option<contact_request::Model>, InternalError> {
        ContactRequest::find()
            .filter(contact_request::Column::EmployerId.eq(employer_id))
            .filter(contact_request::Column::CandidateId.eq(candidate_id))
            .order_by_desc(contact_request::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("latest_contact_request", e))
    }

    /// Whether any accepted request exists between a pair
    pub async fn has_accepted_between(
        &self,
        employer_id: &str,
        candidate_id: &str,
    ) -> Result<bool, InternalError> {
        let accepted = ContactRequest::find()
            .filter(contact_request::Column::EmployerId.eq(employer_id))
            .filter(contact_request::Column::CandidateId.eq(candidate_id))
            .filter(
                contact_request::Column::Status.eq(ContactRequestStatus::Accepted.as_str()),
            )
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_accepted_contact_request", e))?;

        Ok(accepted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_store() -> ContactRequestStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        ContactRequestStore::new(db)
    }

    #[tokio::test]
    async fn test_insert_pending_creates_pending_request() {
        let store = setup_store().await;

        let request = store
            .insert_pending("employer-1", "candidate-1", None, Some("Hello".to_string()))
            .await
            .unwrap();

        assert_eq!(request.status, "pending");
        assert_eq!(request.employer_id, "employer-1");
        assert_eq!(request.candidate_id, "candidate-1");
        assert_eq!(request.job_id, None);
        assert_eq!(request.created_at, request.updated_at);
    }

    #[tokio::test]
    async fn test_second_pending_insert_for_same_key_is_rejected() {
        let store = setup_store().await;

        store
            .insert_pending("employer-1", "candidate-1", None, None)
            .await
            .unwrap();

        let result = store
            .insert_pending("employer-1", "candidate-1", None, None)
            .await;

        match result {
            Err(InternalError::Consent(ConsentError::DuplicatePending)) => {
                // Expected error type
            }
            other => panic!("Expected DuplicatePending, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pending_uniqueness_is_scoped_by_job_key() {
        let store = setup_store().await;

        // Same pair under three distinct keys: no job, job-1, job-2
        store
            .insert_pending("employer-1", "candidate-1", None, None)
            .await
            .unwrap();
        store
            .insert_pending("employer-1", "candidate-1", Some("job-1".to_string()), None)
            .await
            .unwrap();
        store
            .insert_pending("employer-1", "candidate-1", Some("job-2".to_string()), None)
            .await
            .unwrap();

        // Repeating any one key is still rejected
        let result = store
            .insert_pending("employer-1", "candidate-1", Some("job-1".to_string()), None)
            .await;
        assert!(matches!(
            result,
            Err(InternalError::Consent(ConsentError::DuplicatePending))
        ));
    }

    #[tokio::test]
    async fn test_resolved_request_does_not_block_a_new_pending() {
        let store = setup_store().await;

        let first = store
            .insert_pending("employer-1", "candidate-1", None, None)
            .await
            .unwrap();
        let moved = store
            .transition(
                &first.id,
                "candidate-1",
                ContactRequestStatus::Rejected,
                Utc::now().timestamp_millis(),
            )
            .await
            .unwrap();
        assert_eq!(moved, 1);

        // The uniqueness guard only covers live requests
        store
            .insert_pending("employer-1", "candidate-1", None, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_transition_only_moves_pending_rows() {
        let store = setup_store().await;

        let request = store
            .insert_pending("employer-1", "candidate-1", None, None)
            .await
            .unwrap();

        let first = store
            .transition(
                &request.id,
                "candidate-1",
                ContactRequestStatus::Accepted,
                Utc::now().timestamp_millis(),
            )
            .await
            .unwrap();
        assert_eq!(first, 1);

        // A second attempt finds no pending row to move
        let second = store
            .transition(
                &request.id,
                "candidate-1",
                ContactRequestStatus::Rejected,
                Utc::now().timestamp_millis(),
            )
            .await
            .unwrap();
        assert_eq!(second, 0);

        let stored = store.find_by_id(&request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, "accepted");
    }

    #[tokio::test]
    async fn test_transition_requires_the_owning_candidate() {
        let store = setup_store().await;

        let request = store
            .insert_pending("employer-1", "candidate-1", None, None)
            .await
            .unwrap();

        let moved = store
            .transition(
                &request.id,
                "candidate-2",
                ContactRequestStatus::Accepted,
                Utc::now().timestamp_millis(),
            )
            .await
            .unwrap();

        assert_eq!(moved, 0);
        let stored = store.find_by_id(&request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, "pending");
    }

    #[tokio::test]
    async fn test_latest_between_returns_most_recent_request() {
        let store = setup_store().await;

        let first = store
            .insert_pending("employer-1", "candidate-1", None, None)
            .await
            .unwrap();
        store
            .transition(
                &first.id,
                "candidate-1",
                ContactRequestStatus::Rejected,
                Utc::now().timestamp_millis(),
            )
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let second = store
            .insert_pending("employer-1", "candidate-1", Some("job-1".to_string()), None)
            .await
            .unwrap();

        let latest = store
            .latest_between("employer-1", "candidate-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, second.id);
    }

    #[tokio::test]
    async fn test_has_accepted_between_tracks_acceptance() {
        let store = setup_store().await;

        let request = store
            .insert_pending("employer-1", "candidate-1", None, None)
            .await
            .unwrap();

        assert!(!store
            .has_accepted_between("employer-1", "candidate-1")
            .await
            .unwrap());

        store
            .transition(
                &request.id,
                "candidate-1",
                ContactRequestStatus::Accepted,
                Utc::now().timestamp_millis(),
            )
            .await
            .unwrap();

        assert!(store
            .has_accepted_between("employer-1", "candidate-1")
            .await
            .unwrap());
        assert!(!store
            .has_accepted_between("employer-1", "candidate-2")
            .await
            .unwrap());
    }
}
