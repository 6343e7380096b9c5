//! Database connection bootstrap.

use std::env;

use sea_orm::{Database, DatabaseConnection};

use crate::config::db::DbProfile;
use crate::error::AppError;

/// Unified database connector that supports different profiles.
/// This function does NOT run any migrations.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")?;

    // For Test profile, enforce safety rule: DB name must end with "_test"
    if profile == DbProfile::Test {
        validate_test_database_url(&database_url)?;
    }

    let conn = Database::connect(&database_url).await?;
    Ok(conn)
}

/// Connect to an explicit URL (used by the test bootstrap for temp SQLite
/// databases) and bring the schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = Database::connect(database_url).await?;
    run_migrations(&conn)
        .await
        .map_err(|e| AppError::config(format!("migration failed: {e}")))?;
    Ok(conn)
}

/// Run database migrations (idempotent).
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    migration::migrate(conn, migration::MigrationCommand::Up).await
}

/// Validates that a test database URL targets a database with name ending in
/// "_test". This is a safety guard to prevent accidental operations on
/// production databases. SQLite URLs are exempt.
fn validate_test_database_url(database_url: &str) -> Result<(), AppError> {
    if database_url.starts_with("sqlite:") {
        return Ok(());
    }

    if let Some(db_name_start) = database_url.rfind('/') {
        let db_name = &database_url[db_name_start + 1..];
        let db_name = db_name.split('?').next().unwrap_or(db_name);

        if !db_name.ends_with("_test") {
            return Err(AppError::config(format!(
                "Test profile requires database name to end with '_test', but got: '{db_name}'"
            )));
        }
    } else {
        return Err(AppError::config(format!(
            "Invalid database URL format: '{database_url}'"
        )));
    }

    Ok(())
}
