pub mod task;
pub mod user;

pub use task::{Task, TaskInput, TaskResponse};
pub use user::{AuthResponse, User, UserInput, UserResponse};
