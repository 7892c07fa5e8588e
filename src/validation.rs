//! Structural validation of user and task input.
//!
//! Validation runs before any hashing or persistence. The rules themselves are
//! declared on the input models with `validator` derive attributes; the traits
//! here exist so use cases can be handed a different validator in tests.

use validator::{Validate, ValidationErrors};

use crate::models::{TaskInput, UserInput};

pub trait UserValidator: Send + Sync {
    fn validate_user(&self, input: &UserInput) -> Result<(), ValidationErrors>;
}

pub trait TaskValidator: Send + Sync {
    fn validate_task(&self, input: &TaskInput) -> Result<(), ValidationErrors>;
}

/// Applies the rules declared on the input models.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputValidator;

impl UserValidator for InputValidator {
    fn validate_user(&self, input: &UserInput) -> Result<(), ValidationErrors> {
        input.validate()
    }
}

impl TaskValidator for InputValidator {
    fn validate_task(&self, input: &TaskInput) -> Result<(), ValidationErrors> {
        input.validate()
    }
}
