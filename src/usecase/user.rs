use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::auth::{PasswordHasher, TokenService};
use crate::error::AppError;
use crate::models::{UserInput, UserResponse};
use crate::repository::UserRepository;
use crate::validation::UserValidator;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Source of the digest checked when no account matches the email.
const DECOY_PASSWORD: &str = "no-such-account-decoy";

/// Signup and login.
pub struct UserUseCase {
    repo: Arc<dyn UserRepository>,
    validator: Arc<dyn UserValidator>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenService,
    decoy_hash: OnceCell<String>,
}

impl UserUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        validator: Arc<dyn UserValidator>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenService,
    ) -> Self {
        Self {
            repo,
            validator,
            hasher,
            tokens,
            decoy_hash: OnceCell::new(),
        }
    }

    /// Validates the input, hashes the password and stores the new user.
    ///
    /// Persistence is the last step, so a failure leaves nothing to clean up.
    pub async fn sign_up(&self, input: UserInput) -> Result<UserResponse, AppError> {
        self.validator.validate_user(&input)?;

        let hasher = Arc::clone(&self.hasher);
        let password = input.password;
        let password_hash = blocking(move || hasher.hash(&password)).await?;

        let user = self.repo.create_user(&input.email, &password_hash).await?;
        log::info!("Registered user {}", user.id);
        Ok(UserResponse::from(&user))
    }

    /// Checks the credentials and returns a signed bearer token.
    ///
    /// An unknown email and a wrong password produce the same
    /// `AppError::Unauthorized`, and both run one password verification, so
    /// neither the body nor the latency tells callers whether an account exists.
    pub async fn log_in(&self, input: UserInput) -> Result<String, AppError> {
        self.validator.validate_user(&input)?;

        let user = match self.repo.find_by_email(&input.email).await? {
            Some(user) => user,
            None => {
                let decoy = self.decoy_hash().await?;
                self.verify(input.password, decoy).await?;
                log::info!("Login rejected: unknown email");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
            }
        };

        if !self.verify(input.password, user.password_hash.clone()).await? {
            log::info!("Login rejected for user {}: password mismatch", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        self.tokens.issue(user.id)
    }

    async fn verify(&self, password: String, digest: String) -> Result<bool, AppError> {
        let hasher = Arc::clone(&self.hasher);
        blocking(move || hasher.verify(&password, &digest)).await
    }

    /// Digest of `DECOY_PASSWORD` at the hasher's cost, computed on first use.
    async fn decoy_hash(&self) -> Result<String, AppError> {
        let digest = self
            .decoy_hash
            .get_or_try_init(|| {
                let hasher = Arc::clone(&self.hasher);
                blocking(move || hasher.hash(DECOY_PASSWORD))
            })
            .await?;
        Ok(digest.clone())
    }
}

/// Runs CPU-heavy hashing off the async worker threads.
async fn blocking<F, T>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Hashing task failed: {}", e)))?
}
