//! Business rules: validation, hashing and token issuance around the
//! repository calls, with results reshaped into response projections.

pub mod task;
pub mod user;

pub use task::TaskUseCase;
pub use user::UserUseCase;
