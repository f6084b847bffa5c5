use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors surfaced by the user and recipe repositories.
///
/// Uniqueness violations are translated into their own variants so callers
/// never have to inspect raw driver errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Recipe already exists: {0}")]
    DuplicateName(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DbErr),

    #[error("Corrupt stored value: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&DbErr::Custom("boom".to_string())));
    }

    #[test]
    fn db_errors_convert_to_storage() {
        let err: StoreError = DbErr::Custom("disk".to_string()).into();
        assert!(matches!(err, StoreError::Storage(_)));
    }
}
