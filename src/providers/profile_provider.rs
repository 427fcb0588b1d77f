use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::errors::InternalError;
use crate::types::db::candidate_profile;

/// A candidate's private contact fields
#[derive(Debug, Clone, Default)]
pub struct ContactFields {
    pub phone: Option<String>,
    pub portfolio_url: Option<String>,
    pub cv_reference: Option<String>,
}

/// Collaborator seam over the profile service that owns candidate contact
/// data
///
/// The consent subsystem never stores or caches these values; callers may
/// fetch them only after the access resolver has granted disclosure.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fetch the contact fields of a candidate
    ///
    /// A candidate without a profile row yields empty fields; that case is
    /// indistinguishable from a profile with every field unset.
    async fn contact_fields(&self, candidate_id: &str) -> Result<ContactFields, InternalError>;
}

/// ProfileProvider backed by the marketplace database
pub struct DbProfileProvider {
    db: DatabaseConnection,
}

impl DbProfileProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileProvider for DbProfileProvider {
    async fn contact_fields(&self, candidate_id: &str) -> Result<ContactFields, InternalError> {
        let profile = candidate_profile::Entity::find_by_id(candidate_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_candidate_profile", e))?;

        Ok(profile
            .map(|p| ContactFields {
                phone: p.phone,
                portfolio_url: p.portfolio_url,
                cv_reference: p.cv_reference,
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::DirectoryStore;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    #[tokio::test]
    async fn test_missing_profile_reads_as_empty_fields() {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let provider = DbProfileProvider::new(db.clone());
        let fields = provider.contact_fields("candidate-1").await.unwrap();
        assert_eq!(fields.phone, None);
        assert_eq!(fields.portfolio_url, None);
        assert_eq!(fields.cv_reference, None);

        let directory = DirectoryStore::new(db);
        directory
            .upsert_contact_profile(
                "candidate-1",
                Some("+15550001111".to_string()),
                Some("https://portfolio.example".to_string()),
                None,
            )
            .await
            .unwrap();

        let fields = provider.contact_fields("candidate-1").await.unwrap();
        assert_eq!(fields.phone, Some("+15550001111".to_string()));
        assert_eq!(fields.cv_reference, None);
    }
}
