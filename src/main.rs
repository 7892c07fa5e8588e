use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use tasknest::auth::{BcryptHasher, TokenService};
use tasknest::config::Config;
use tasknest::repository::{PgTaskRepository, PgUserRepository};
use tasknest::{db, routes, AppError, AppState};

fn startup_error(error: AppError) -> io::Error {
    log::error!("{}", error);
    io::Error::new(io::ErrorKind::Other, error.to_string())
}

fn cors(origin: Option<&str>) -> Cors {
    let cors = match origin {
        Some(origin) => Cors::default().allowed_origin(origin).supports_credentials(),
        None => Cors::default().allow_any_origin(),
    };
    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A missing JWT_SECRET or DATABASE_URL stops the process here.
    let config = Config::from_env().map_err(startup_error)?;
    let tokens = TokenService::new(&config.jwt_secret).map_err(startup_error)?;
    let pool = db::connect(&config.database).await.map_err(startup_error)?;

    let state = AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgTaskRepository::new(pool)),
        Arc::new(BcryptHasher::new(config.bcrypt_cost)),
        tokens,
    );

    log::info!("Starting tasknest server at {}", config.server_url());
    let cors_origin = config.cors_origin.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(cors_origin.as_deref()))
            .wrap(Logger::default())
            .configure(|cfg| state.register(cfg))
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
