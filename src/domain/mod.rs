//! Domain types for recipe discovery with strong typing.
//!
//! Identifiers follow the newtype pattern so a user ID can never be passed
//! where a recipe ID is expected.

pub mod filters;
pub mod recipe;
pub mod slot;

pub use filters::FilterKind;
pub use recipe::{IngredientSource, RawRecipe, RecipeDetails, Step};
pub use slot::Slot;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a registered user.
///
/// # Examples
///
/// ```rust
/// use cookbook::domain::UserId;
///
/// let id = UserId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "UserId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Unique identifier for a persisted recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(i32);

impl RecipeId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "RecipeId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecipeId> for i32 {
    fn from(id: RecipeId) -> Self {
        id.0
    }
}

impl From<i32> for RecipeId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Whether a recipe is in a user's saved list after a toggle.
///
/// Replaces a bare `bool` return so call sites read as intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SavedState {
    Saved,
    NotSaved,
}

impl SavedState {
    #[must_use]
    pub const fn is_saved(self) -> bool {
        matches!(self, Self::Saved)
    }
}

impl From<bool> for SavedState {
    fn from(saved: bool) -> Self {
        if saved { Self::Saved } else { Self::NotSaved }
    }
}
