use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Opens a connection pool.
///
/// Each connection carries a Postgres `statement_timeout`, so a stuck query is
/// cancelled by the server instead of holding the request open.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    let timeout = Duration::from_secs(config.statement_timeout_secs);
    let statement_timeout = format!("{}s", config.statement_timeout_secs);

    let options: PgConnectOptions = config
        .url
        .parse::<PgConnectOptions>()
        .map_err(|e| AppError::ConfigError(format!("Invalid DATABASE_URL: {}", e)))?
        .options([("statement_timeout", statement_timeout.as_str())]);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(timeout)
        .connect_with(options)
        .await?;

    log::info!(
        "Connected to database (max {} connections, {}s statement timeout)",
        config.max_connections,
        config.statement_timeout_secs
    );
    Ok(pool)
}

/// Applies the SQL files under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
