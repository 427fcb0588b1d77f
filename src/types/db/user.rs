use sea_orm::entity::prelude::*;

/// SeaORM entity for the users table (marketplace identity directory).
///
/// `role` holds "candidate" or "employer"; the org_* columns are only
/// meaningful for employers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub display_name: String,
    pub role: String,
    pub org_name: Option<String>,
    pub org_verified: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
