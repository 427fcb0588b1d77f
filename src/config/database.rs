use sea_orm::{Database, DatabaseConnection};
use migration::{Migrator, MigratorTrait};

use crate::errors::InternalError;

/// Connect to the marketplace database
///
/// Does not run migrations; call `migrate` separately so callers control
/// when schema changes apply.
pub async fn init_database(database_url: &str) -> Result<DatabaseConnection, InternalError> {
    let db = Database::connect(database_url)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;

    tracing::debug!("Connected to database: {}", database_url);

    Ok(db)
}

/// Apply all pending migrations
pub async fn migrate(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("migrate_database", e))?;

    tracing::info!("Database migrations complete");

    Ok(())
}
