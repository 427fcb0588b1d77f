use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create contact_requests table
        manager
            .create_table(
                Table::create()
                    .table(ContactRequests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ContactRequests::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(ContactRequests::EmployerId).string().not_null())
                    .col(ColumnDef::new(ContactRequests::CandidateId).string().not_null())
                    .col(ColumnDef::new(ContactRequests::JobId).string())
                    .col(ColumnDef::new(ContactRequests::Message).string())
                    .col(ColumnDef::new(ContactRequests::Status).string().not_null())
                    .col(ColumnDef::new(ContactRequests::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(ContactRequests::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Lookup indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_contact_requests_employer_candidate")
                    .table(ContactRequests::Table)
                    .col(ContactRequests::EmployerId)
                    .col(ContactRequests::CandidateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contact_requests_candidate_id")
                    .table(ContactRequests::Table)
                    .col(ContactRequests::CandidateId)
                    .to_owned(),
            )
            .await?;

        // The duplicate-pending guard has to live in the storage engine: two
        // concurrent creates for the same (employer, candidate, job) key must
        // be rejected deterministically, not left to an application pre-check.
        // SQLite treats NULLs as distinct in unique indexes, so the "no job"
        // case is normalized to '' inside the index expression. sea-query has
        // no builder support for partial indexes, hence raw SQL.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_contact_requests_pending_key \
                 ON contact_requests (employer_id, candidate_id, ifnull(job_id, '')) \
                 WHERE status = 'pending'",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactRequests::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ContactRequests {
    Table,
    Id,
    EmployerId,
    CandidateId,
    JobId,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}
