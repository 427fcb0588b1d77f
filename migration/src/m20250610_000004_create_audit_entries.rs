use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create audit_entries table. Deliberately no foreign keys: an entry
        // must stay valid even after the entity it references is deleted.
        manager
            .create_table(
                Table::create()
                    .table(AuditEntries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AuditEntries::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(AuditEntries::Timestamp).string().not_null())
                    .col(ColumnDef::new(AuditEntries::Action).string().not_null())
                    .col(ColumnDef::new(AuditEntries::ActorId).string())
                    .col(ColumnDef::new(AuditEntries::SubjectType).string().not_null())
                    .col(ColumnDef::new(AuditEntries::SubjectId).string().not_null())
                    .col(ColumnDef::new(AuditEntries::Detail).string().not_null())
                    .col(ColumnDef::new(AuditEntries::Origin).string())
                    .to_owned(),
            )
            .await?;

        // Create indexes separately
        manager
            .create_index(
                Index::create()
                    .name("idx_audit_entries_action")
                    .table(AuditEntries::Table)
                    .col(AuditEntries::Action)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_entries_subject")
                    .table(AuditEntries::Table)
                    .col(AuditEntries::SubjectType)
                    .col(AuditEntries::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_entries_timestamp")
                    .table(AuditEntries::Table)
                    .col(AuditEntries::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditEntries::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AuditEntries {
    Table,
    Id,
    Timestamp,
    Action,
    ActorId,
    SubjectType,
    SubjectId,
    Detail,
    Origin,
}
