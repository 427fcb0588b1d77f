use sea_orm::entity::prelude::*;

/// SeaORM entity for the audit_entries table.
///
/// Write-once rows. `actor_id` is nullable for system-originated entries and
/// there are no foreign keys: an entry must remain valid after the entity it
/// references is gone.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: String,
    pub action: String,
    pub actor_id: Option<String>,
    pub subject_type: String,
    pub subject_id: String,
    pub detail: String,
    pub origin: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
