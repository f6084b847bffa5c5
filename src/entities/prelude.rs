pub use super::recipes::Entity as Recipes;
pub use super::response_cache::Entity as ResponseCache;
pub use super::saved_recipes::Entity as SavedRecipes;
pub use super::users::Entity as Users;
