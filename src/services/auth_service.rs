//! Domain service for registration and login.

use serde::Deserialize;
use thiserror::Error;

use crate::db::{StoreError, User};
use crate::domain::UserId;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No account registered for that email")]
    InvalidEmail,

    #[error("Password incorrect")]
    InvalidPassword,

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Fields of the sign-up form.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Validates the sign-up form and creates the user.
    ///
    /// # Errors
    ///
    /// [`AuthError::Validation`] for a malformed form,
    /// [`AuthError::DuplicateEmail`] if the email is taken.
    async fn register(&self, registration: &Registration) -> Result<User, AuthError>;

    /// Creates a user without form checks.
    async fn create_user(&self, email: &str, password: &str, name: &str) -> Result<User, AuthError>;

    /// Checks an email/password pair.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidEmail`] when no user has that email,
    /// [`AuthError::InvalidPassword`] when the password does not match.
    async fn verify_login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;
}
