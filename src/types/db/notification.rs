use sea_orm::entity::prelude::*;

/// SeaORM entity for the notifications table.
///
/// `reference_id` optionally carries the id of the contact request that
/// produced the notification, so a notification UI can resolve back to the
/// request it is about.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub recipient_id: String,
    pub title: String,
    pub body: String,
    pub category: String,
    pub reference_id: Option<String>,
    pub is_read: bool,
    pub read_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
