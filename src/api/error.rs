use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::{AuthError, CacheError, DiscoveryError, RecipeError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ExternalApiError { service: String, message: String },

    ValidationError(String),

    Conflict(String),

    InternalError(String),

    Unauthorized(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::ExternalApiError { service, message } => {
                write!(f, "{service} error: {message}")
            }
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            Self::ExternalApiError { service, message } => {
                tracing::warn!("{} API error: {}", service, message);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("{service} service is unavailable"),
                )
            }
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail | AuthError::InvalidPassword => {
                Self::Unauthorized(err.to_string())
            }
            AuthError::DuplicateEmail(_) => Self::Conflict(err.to_string()),
            AuthError::Validation(msg) => Self::ValidationError(msg),
            AuthError::Storage(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<RecipeError> for ApiError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::NotFound(id) => Self::not_found("Recipe", id),
            RecipeError::DuplicateName(_) => Self::Conflict(err.to_string()),
            RecipeError::Storage(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<DiscoveryError> for ApiError {
    fn from(err: DiscoveryError) -> Self {
        match err {
            DiscoveryError::NotFound(_)
            | DiscoveryError::NotCached(_)
            | DiscoveryError::NoSuchIndex { .. } => Self::NotFound(err.to_string()),
            DiscoveryError::Upstream(message) => Self::spoonacular_error(message),
            DiscoveryError::Cache(e) => e.into(),
            DiscoveryError::Recipe(e) => e.into(),
        }
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id} not found"))
    }

    pub fn spoonacular_error(msg: impl Into<String>) -> Self {
        Self::ExternalApiError {
            service: "Spoonacular".to_string(),
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Slot;

    fn status(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(status(AuthError::InvalidEmail), StatusCode::UNAUTHORIZED);
        assert_eq!(status(AuthError::InvalidPassword), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(AuthError::DuplicateEmail("a@b.co".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(AuthError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(RecipeError::DuplicateName("Pasta".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(RecipeError::Storage("disk".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(DiscoveryError::NotCached(Slot::HomeBatch)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(DiscoveryError::Upstream("timeout".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn not_found_keeps_searched_phrase() {
        let err: ApiError = DiscoveryError::NotFound("xyzzy".into()).into();
        assert!(matches!(err, ApiError::NotFound(ref msg) if msg.contains("xyzzy")));
    }
}
