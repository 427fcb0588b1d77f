use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::DisplayName).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::OrgName).string())
                    .col(ColumnDef::new(Users::OrgVerified).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create jobs table
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Jobs::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Jobs::EmployerId).string().not_null())
                    .col(ColumnDef::new(Jobs::Title).string().not_null())
                    .col(ColumnDef::new(Jobs::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_employer_id")
                    .table(Jobs::Table)
                    .col(Jobs::EmployerId)
                    .to_owned(),
            )
            .await?;

        // Create applications table
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Applications::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Applications::JobId).string().not_null())
                    .col(ColumnDef::new(Applications::CandidateId).string().not_null())
                    .col(ColumnDef::new(Applications::Status).string().not_null())
                    .col(ColumnDef::new(Applications::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Applications::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_job_id")
                            .from(Applications::Table, Applications::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_candidate_id")
                    .table(Applications::Table)
                    .col(Applications::CandidateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_job_id")
                    .table(Applications::Table)
                    .col(Applications::JobId)
                    .to_owned(),
            )
            .await?;

        // Create candidate_profiles table
        manager
            .create_table(
                Table::create()
                    .table(CandidateProfiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CandidateProfiles::CandidateId).string().not_null().primary_key())
                    .col(ColumnDef::new(CandidateProfiles::Phone).string())
                    .col(ColumnDef::new(CandidateProfiles::PortfolioUrl).string())
                    .col(ColumnDef::new(CandidateProfiles::CvReference).string())
                    .col(ColumnDef::new(CandidateProfiles::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CandidateProfiles::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    DisplayName,
    Role,
    OrgName,
    OrgVerified,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Jobs {
    Table,
    Id,
    EmployerId,
    Title,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    JobId,
    CandidateId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CandidateProfiles {
    Table,
    CandidateId,
    Phone,
    PortfolioUrl,
    CvReference,
    UpdatedAt,
}
