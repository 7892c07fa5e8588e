use std::process::ExitCode;

use tasknest::config::DatabaseConfig;
use tasknest::{db, AppError};

async fn migrate() -> Result<(), AppError> {
    let config = DatabaseConfig::from_env()?;
    let pool = db::connect(&config).await?;
    db::run_migrations(&pool).await?;
    pool.close().await;
    Ok(())
}

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match migrate().await {
        Ok(()) => {
            log::info!("Successfully migrated");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Error migrating: {}", e);
            ExitCode::FAILURE
        }
    }
}
