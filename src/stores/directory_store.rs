use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set,
};

use crate::errors::InternalError;
use crate::types::db::{application, candidate_profile, job, user};
use crate::types::internal::directory::{ApplicationStatus, Identity, Role};

/// Repository over the marketplace directory: users, jobs, applications and
/// candidate profiles
///
/// These tables are owned by the routine marketplace modules; the consent
/// subsystem only reads them for preconditions and the implicit-consent
/// path, plus a handful of inserts used for seeding.
pub struct DirectoryStore {
    db: DatabaseConnection,
}

impl DirectoryStore {
    /// Create a new DirectoryStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve a user id into an identity, or `None` if unknown
    pub async fn find_identity(&self, user_id: &str) -> Result<Option<Identity>, InternalError> {
        let found = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user", e))?;

        found.map(Identity::try_from).transpose()
    }

    /// Whether the employer currently has a live application from the
    /// candidate on any of their jobs
    ///
    /// Live means the application sits in an active pipeline stage; closed
    /// applications do not count.
    pub async fn has_active_application(
        &self,
        employer_id: &str,
        candidate_id: &str,
    ) -> Result<bool, InternalError> {
        let found = application::Entity::find()
            .join(JoinType::InnerJoin, application::Relation::Job.def())
            .filter(job::Column::EmployerId.eq(employer_id))
            .filter(application::Column::CandidateId.eq(candidate_id))
            .filter(application::Column::Status.is_in(ApplicationStatus::active_stages()))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_active_application", e))?;

        Ok(found.is_some())
    }

    /// Whether a job exists and belongs to the given employer
    pub async fn job_owned_by(
        &self,
        job_id: &str,
        employer_id: &str,
    ) -> Result<bool, InternalError> {
        let found = job::Entity::find()
            .filter(job::Column::Id.eq(job_id))
            .filter(job::Column::EmployerId.eq(employer_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_job", e))?;

        Ok(found.is_some())
    }

    /// Insert a user row. Used by dev seeding and tests.
    pub async fn insert_user(
        &self,
        id: &str,
        display_name: &str,
        role: Role,
        org_name: Option<String>,
        org_verified: bool,
    ) -> Result<(), InternalError> {
        let row = user::ActiveModel {
            id: Set(id.to_string()),
            display_name: Set(display_name.to_string()),
            role: Set(role.as_str().to_string()),
            org_name: Set(org_name),
            org_verified: Set(org_verified),
            created_at: Set(Utc::now().timestamp_millis()),
        };
        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_user", e))?;
        Ok(())
    }

    /// Insert a job row. Used by dev seeding and tests.
    pub async fn insert_job(
        &self,
        id: &str,
        employer_id: &str,
        title: &str,
    ) -> Result<(), InternalError> {
        let row = job::ActiveModel {
            id: Set(id.to_string()),
            employer_id: Set(employer_id.to_string()),
            title: Set(title.to_string()),
            created_at: Set(Utc::now().timestamp_millis()),
        };
        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_job", e))?;
        Ok(())
    }

    /// Insert an application row. Used by dev seeding and tests.
    pub async fn insert_application(
        &self,
        id: &str,
        job_id: &str,
        candidate_id: &str,
        status: ApplicationStatus,
    ) -> Result<(), InternalError> {
        let now = Utc::now().timestamp_millis();
        let row = application::ActiveModel {
            id: Set(id.to_string()),
            job_id: Set(job_id.to_string()),
            candidate_id: Set(candidate_id.to_string()),
            status: Set(status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_application", e))?;
        Ok(())
    }

    /// Move an application to a new pipeline stage
    pub async fn set_application_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<(), InternalError> {
        application::Entity::update_many()
            .col_expr(application::Column::Status, Expr::value(status.as_str()))
            .col_expr(
                application::Column::UpdatedAt,
                Expr::value(Utc::now().timestamp_millis()),
            )
            .filter(application::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_application_status", e))?;
        Ok(())
    }

    /// Create or replace a candidate's contact profile. Used by dev seeding
    /// and tests.
    pub async fn upsert_contact_profile(
        &self,
        candidate_id: &str,
        phone: Option<String>,
        portfolio_url: Option<String>,
        cv_reference: Option<String>,
    ) -> Result<(), InternalError> {
        let existing = candidate_profile::Entity::find_by_id(candidate_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_candidate_profile", e))?;

        let now = Utc::now().timestamp_millis();
        match existing {
            Some(model) => {
                let mut row: candidate_profile::ActiveModel = model.into();
                row.phone = Set(phone);
                row.portfolio_url = Set(portfolio_url);
                row.cv_reference = Set(cv_reference);
                row.updated_at = Set(now);
                row.update(&self.db)
                    .await
                    .map_err(|e| InternalError::database("update_candidate_profile", e))?;
            }
            None => {
                let row = candidate_profile::ActiveModel {
                    candidate_id: Set(candidate_id.to_string()),
                    phone: Set(phone),
                    portfolio_url: Set(portfolio_url),
                    cv_reference: Set(cv_reference),
                    updated_at: Set(now),
                };
                row.insert(&self.db)
                    .await
                    .map_err(|e| InternalError::database("insert_candidate_profile", e))?;
            }
        }
        Ok(())
    }
}
