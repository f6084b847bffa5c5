use axum::{
    Extension, Json,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{Instrument, Span, info_span};

use super::{ApiError, ApiResponse, AppState, UserDto, validation};
use crate::db::User;
use crate::domain::UserId;
use crate::services::Registration;

const SESSION_USER_KEY: &str = "user_id";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The signed-in user, inserted into request extensions by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

// ============================================================================
// Middleware
// ============================================================================

/// Rejects requests without a session belonging to an existing user.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let user = session_user(&state, &session)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    let span = user_span(user.id);
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).instrument(span).await)
}

/// Span wrapping everything a signed-in request does below the auth layer.
fn user_span(user_id: UserId) -> Span {
    info_span!("user", user_id = user_id.value())
}

/// Resolves the session's user, if any. Sessions pointing at a missing user
/// are treated as anonymous.
pub async fn session_user(state: &AppState, session: &Session) -> Result<Option<User>, ApiError> {
    let Some(id) = session
        .get::<UserId>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
    else {
        return Ok(None);
    };

    Ok(state.auth_service().find_user_by_id(id).await?)
}

async fn start_session(session: &Session, user: &User) -> Result<(), ApiError> {
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;
    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
/// Create an account and sign in
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<Registration>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state.auth_service().register(&payload).await?;
    start_session(&session, &user).await?;

    Ok(Json(ApiResponse::success(user.into())))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    validation::validate_login(&payload.email, &payload.password)?;

    let user = state
        .auth_service()
        .verify_login(payload.email.trim(), &payload.password)
        .await?;
    start_session(&session, &user).await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(ApiResponse::success(user.into())))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Json<ApiResponse<()>>, ApiError> {
    session
        .flush()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to end session: {e}")))?;
    Ok(Json(ApiResponse::success(())))
}

/// GET /auth/me
pub async fn get_current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<ApiResponse<UserDto>> {
    Json(ApiResponse::success(user.into()))
}
