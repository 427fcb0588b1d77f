pub use sea_orm_migration::prelude::*;

mod m20250610_000001_create_directory_tables;
mod m20250610_000002_create_contact_requests;
mod m20250610_000003_create_notifications;
mod m20250610_000004_create_audit_entries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250610_000001_create_directory_tables::Migration),
            Box::new(m20250610_000002_create_contact_requests::Migration),
            Box::new(m20250610_000003_create_notifications::Migration),
            Box::new(m20250610_000004_create_audit_entries::Migration),
        ]
    }
}
