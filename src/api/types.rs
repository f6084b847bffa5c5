use serde::Serialize;

use crate::db::{Recipe, User};
use crate::domain::{FilterKind, RecipeDetails, RecipeId, Slot, Step, UserId};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// A recipe as shown on the details page.
#[derive(Debug, Serialize)]
pub struct RecipeDetailsDto {
    pub slot: Slot,
    pub index: usize,
    pub dish_name: String,
    pub dish_photo: Option<String>,
    pub instructions: Vec<Step>,
    pub ingredients: Vec<String>,
    /// `None` for anonymous visitors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
}

impl RecipeDetailsDto {
    #[must_use]
    pub fn new(slot: Slot, index: usize, details: RecipeDetails, saved: Option<bool>) -> Self {
        Self {
            slot,
            index,
            dish_name: details.dish_name,
            dish_photo: details.dish_photo,
            instructions: details.instructions,
            ingredients: details.ingredients,
            saved,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SavedRecipeDto {
    pub id: RecipeId,
    pub dish_name: String,
    pub dish_photo: Option<String>,
    pub instructions: Vec<Step>,
    pub ingredients: Vec<String>,
}

impl From<Recipe> for SavedRecipeDto {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            dish_name: recipe.dish_name,
            dish_photo: recipe.dish_photo,
            instructions: recipe.instructions,
            ingredients: recipe.ingredients,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveToggleDto {
    pub dish_name: String,
    pub saved: bool,
}

#[derive(Debug, Serialize)]
pub struct UnsaveDto {
    pub recipe_id: RecipeId,
    pub removed: bool,
}

#[derive(Debug, Serialize)]
pub struct FilterCatalogDto {
    pub kind: FilterKind,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

impl From<FilterKind> for FilterCatalogDto {
    fn from(kind: FilterKind) -> Self {
        Self {
            kind,
            label: kind.label(),
            options: kind.options(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: bool,
    pub cache: bool,
}
