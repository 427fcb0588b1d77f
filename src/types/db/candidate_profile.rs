use sea_orm::entity::prelude::*;

/// SeaORM entity for the candidate_profiles table.
///
/// All contact fields are optional; a row may exist with every field
/// empty. Absence of a row is treated the same as an empty profile.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "candidate_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub candidate_id: String,
    pub phone: Option<String>,
    pub portfolio_url: Option<String>,
    pub cv_reference: Option<String>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
