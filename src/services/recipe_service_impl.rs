//! `SeaORM` implementation of the `RecipeService` trait.

use async_trait::async_trait;
use tracing::debug;

use crate::db::{Recipe, Store};
use crate::domain::{RecipeDetails, RecipeId, SavedState, UserId};
use crate::services::recipe_service::{RecipeError, RecipeService};

pub struct SeaOrmRecipeService {
    store: Store,
}

impl SeaOrmRecipeService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecipeService for SeaOrmRecipeService {
    async fn find_recipe_by_name(&self, dish_name: &str) -> Result<Option<Recipe>, RecipeError> {
        Ok(self.store.get_recipe_by_name(dish_name).await?)
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, RecipeError> {
        self.store
            .get_recipe(id)
            .await?
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))
    }

    async fn create_recipe(&self, details: &RecipeDetails) -> Result<Recipe, RecipeError> {
        Ok(self.store.create_recipe(details).await?)
    }

    async fn find_or_create_recipe(&self, details: &RecipeDetails) -> Result<Recipe, RecipeError> {
        Ok(self.store.find_or_create_recipe(details).await?)
    }

    async fn is_saved(&self, user: UserId, recipe: RecipeId) -> Result<bool, RecipeError> {
        Ok(self.store.is_recipe_saved(user, recipe).await?)
    }

    async fn save_for_user(&self, user: UserId, recipe: RecipeId) -> Result<bool, RecipeError> {
        // The link would violate the foreign key anyway; report it as a miss.
        self.get_recipe(recipe).await?;

        let inserted = self.store.save_recipe(user, recipe).await?;
        debug!(%user, %recipe, inserted, "Saved recipe");
        Ok(inserted)
    }

    async fn unsave_for_user(&self, user: UserId, recipe: RecipeId) -> Result<bool, RecipeError> {
        let removed = self.store.unsave_recipe(user, recipe).await?;
        debug!(%user, %recipe, removed, "Unsaved recipe");
        Ok(removed)
    }

    async fn toggle_saved(
        &self,
        user: UserId,
        details: &RecipeDetails,
    ) -> Result<SavedState, RecipeError> {
        let recipe = self.find_or_create_recipe(details).await?;
        let state = self.store.toggle_saved_recipe(user, recipe.id).await?;
        debug!(%user, recipe = %recipe.id, dish = %details.dish_name, ?state, "Toggled saved recipe");
        Ok(state)
    }

    async fn list_saved(&self, user: UserId) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self.store.list_saved_recipes(user).await?)
    }
}
