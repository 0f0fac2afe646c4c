use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Establishes a connection pool to the SQLite database described by `settings`.
///
/// The database file is created if it does not exist yet, and foreign keys are
/// enforced on every connection.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|e| DbError::ConnectionConfigError(format!("{}: {e}", settings.url)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(5));

    // An in-memory database lives only as long as its connection.
    if settings.is_in_memory() {
        pool_options = pool_options
            .min_connections(settings.max_connections)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;
    tracing::info!(url = %settings.url, max_connections = settings.max_connections, "Connected to the database.");
    Ok(pool)
}

/// Applies the embedded migrations so the schema is up-to-date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::debug!("Database migrations applied.");
    Ok(())
}

/// Connects and migrates in one step.
pub async fn connect_and_migrate(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    let pool = connect(settings).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
