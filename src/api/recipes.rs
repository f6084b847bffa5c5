use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user;
use super::{ApiError, ApiResponse, AppState, RecipeDetailsDto, validation};
use crate::domain::{RecipeDetails, Slot};
use crate::services::RecipeCard;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Deserialize)]
pub struct FilteredSearchRequest {
    /// `1`/`2`/`3` or `intolerances`/`cuisine`/`diet`.
    pub kind: String,
    pub values: Vec<String>,
}

/// GET /recipes/home
/// Fresh random batch for the landing page
pub async fn home(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RecipeCard>>>, ApiError> {
    let cards = state.discovery().home_batch().await?;
    Ok(Json(ApiResponse::success(cards)))
}

/// GET /recipes/search?q=
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<RecipeCard>>>, ApiError> {
    let dish_name = validation::validate_search_query(&query.q)?;
    let cards = state.discovery().search_by_name(dish_name).await?;
    Ok(Json(ApiResponse::success(cards)))
}

/// POST /recipes/filtered
pub async fn filtered_search(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FilteredSearchRequest>,
) -> Result<Json<ApiResponse<Vec<RecipeCard>>>, ApiError> {
    let kind = validation::parse_filter_kind(&payload.kind)?;
    let values = validation::validate_filter_values(payload.values)?;

    let cards = state.discovery().filtered_search(kind, values).await?;
    Ok(Json(ApiResponse::success(cards)))
}

/// GET /recipes/random
/// A single random recipe, shown straight away as details
pub async fn random(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<RecipeDetailsDto>>, ApiError> {
    let details = state.discovery().random_pick().await?;
    let dto = with_saved_status(&state, &session, Slot::RandomPick, 0, details).await?;
    Ok(Json(ApiResponse::success(dto)))
}

/// GET /results/{slot}
pub async fn results(
    State(state): State<Arc<AppState>>,
    Path(slot): Path<String>,
) -> Result<Json<ApiResponse<Vec<RecipeCard>>>, ApiError> {
    let slot = validation::parse_slot(&slot)?;
    let cards = state.discovery().results(slot).await?;
    Ok(Json(ApiResponse::success(cards)))
}

/// GET /recipes/{slot}/{index}
pub async fn details(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path((slot, index)): Path<(String, usize)>,
) -> Result<Json<ApiResponse<RecipeDetailsDto>>, ApiError> {
    let slot = validation::parse_slot(&slot)?;
    let details = state.discovery().details(slot, index).await?;
    let dto = with_saved_status(&state, &session, slot, index, details).await?;
    Ok(Json(ApiResponse::success(dto)))
}

async fn with_saved_status(
    state: &AppState,
    session: &Session,
    slot: Slot,
    index: usize,
    details: RecipeDetails,
) -> Result<RecipeDetailsDto, ApiError> {
    let saved = match session_user(state, session).await? {
        Some(user) => Some(state.discovery().is_saved_by(user.id, &details).await?),
        None => None,
    };

    Ok(RecipeDetailsDto::new(slot, index, details, saved))
}
