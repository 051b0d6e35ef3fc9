//! Database migration command.

use trainhub_core::config::AppConfig;
use trainhub_core::error::AppError;
use trainhub_database::DatabasePool;

use crate::output;

/// Apply all pending migrations to the configured PostgreSQL database.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    if config.database.provider != "postgres" {
        return Err(AppError::configuration(format!(
            "Migrations require the postgres provider, configured provider is '{}'",
            config.database.provider
        )));
    }

    let mut db_config = config.database.clone();
    db_config.run_migrations = false;
    let db = DatabasePool::connect(&db_config).await?;

    println!("Running database migrations...");
    trainhub_database::migration::run_migrations(db.pool()).await?;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
