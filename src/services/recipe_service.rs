//! Domain service for stored recipes and a user's saved list.

use thiserror::Error;

use crate::db::{Recipe, StoreError};
use crate::domain::{RecipeDetails, RecipeId, SavedState, UserId};

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("Recipe already exists: {0}")]
    DuplicateName(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for RecipeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName(name) => Self::DuplicateName(name),
            other => Self::Storage(other.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait RecipeService: Send + Sync {
    async fn find_recipe_by_name(&self, dish_name: &str) -> Result<Option<Recipe>, RecipeError>;

    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, RecipeError>;

    /// # Errors
    ///
    /// [`RecipeError::DuplicateName`] if a recipe with the same dish name exists.
    async fn create_recipe(&self, details: &RecipeDetails) -> Result<Recipe, RecipeError>;

    async fn find_or_create_recipe(&self, details: &RecipeDetails) -> Result<Recipe, RecipeError>;

    async fn is_saved(&self, user: UserId, recipe: RecipeId) -> Result<bool, RecipeError>;

    /// Idempotent. Returns whether a new link was created.
    async fn save_for_user(&self, user: UserId, recipe: RecipeId) -> Result<bool, RecipeError>;

    /// Idempotent. Returns whether a link was removed.
    async fn unsave_for_user(&self, user: UserId, recipe: RecipeId) -> Result<bool, RecipeError>;

    /// Creates the recipe row on first use, then flips the user's link to it.
    async fn toggle_saved(
        &self,
        user: UserId,
        details: &RecipeDetails,
    ) -> Result<SavedState, RecipeError>;

    /// Saved recipes in the order they were saved.
    async fn list_saved(&self, user: UserId) -> Result<Vec<Recipe>, RecipeError>;
}
