pub mod spoonacular;

pub use spoonacular::{RecipeApi, SearchQuery, SpoonacularClient};
