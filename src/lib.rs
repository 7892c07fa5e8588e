#![doc = "The `tasknest` library crate."]
#![doc = ""]
#![doc = "Password hashing, bearer-token issuance and verification, scoped task"]
#![doc = "repositories, the use cases built on them and the HTTP routes that expose"]
#![doc = "them. The binaries (`main.rs`, `bin/migrate.rs`) only wire these together."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod usecase;
pub mod validation;

pub use crate::error::AppError;
pub use crate::routes::AppState;
