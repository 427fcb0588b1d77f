use sea_orm::entity::prelude::*;

/// SeaORM entity for the contact_requests table.
///
/// A row is the consent artifact between one employer and one candidate,
/// optionally scoped to a job. Rows are never deleted; a resolved row is the
/// durable record of the disclosure decision.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub employer_id: String,
    pub candidate_id: String,
    pub job_id: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
