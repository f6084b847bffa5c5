use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState, SaveToggleDto, SavedRecipeDto, UnsaveDto, validation};

/// GET /saved
/// The signed-in user's recipes, oldest save first
pub async fn list_saved(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<SavedRecipeDto>>>, ApiError> {
    let recipes = state.recipe_service().list_saved(user.id).await?;
    Ok(Json(ApiResponse::success(
        recipes.into_iter().map(SavedRecipeDto::from).collect(),
    )))
}

/// POST /saved/{slot}/{index}
/// Save the cached recipe, or unsave it if it is already saved
pub async fn toggle_saved(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((slot, index)): Path<(String, usize)>,
) -> Result<Json<ApiResponse<SaveToggleDto>>, ApiError> {
    let slot = validation::parse_slot(&slot)?;
    let (details, saved_state) = state.discovery().toggle_saved(user.id, slot, index).await?;

    tracing::info!(
        user_id = %user.id,
        dish = %details.dish_name,
        saved = saved_state.is_saved(),
        "Saved recipes updated"
    );

    Ok(Json(ApiResponse::success(SaveToggleDto {
        dish_name: details.dish_name,
        saved: saved_state.is_saved(),
    })))
}

/// DELETE /saved/{recipe_id}
pub async fn unsave(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<ApiResponse<UnsaveDto>>, ApiError> {
    let recipe_id = validation::validate_recipe_id(recipe_id)?;
    let removed = state
        .recipe_service()
        .unsave_for_user(user.id, recipe_id)
        .await?;

    Ok(Json(ApiResponse::success(UnsaveDto { recipe_id, removed })))
}
