//! Recipe records as returned by the recipe API and the details derived from
//! them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Slot;

/// One recipe record from the upstream API.
///
/// Only the fields the application reads are typed; everything else is kept
/// in `extra`. A cached record reloads to an equal value, but a `null`
/// image or empty `extendedIngredients` is written back as an absent key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipe {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default)]
    pub analyzed_instructions: Vec<AnalyzedInstruction>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended_ingredients: Vec<ExtendedIngredient>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedInstruction {
    #[serde(default)]
    pub steps: Vec<Step>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single preparation step. Free-form apart from the ingredient names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,

    #[serde(default)]
    pub step: String,

    #[serde(default)]
    pub ingredients: Vec<StepIngredient>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepIngredient {
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedIngredient {
    pub original: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawRecipe {
    /// Steps of the first analyzed instruction block, or none.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        self.analyzed_instructions
            .first()
            .map_or(&[], |block| block.steps.as_slice())
    }
}

/// Where the ingredient list of a record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientSource {
    /// `extendedIngredients[].original`, present on random-recipe records.
    Extended,
    /// Ingredient names referenced by the instruction steps, for search records.
    InstructionSteps,
}

/// The view of a recipe shown on the details page and persisted on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub dish_name: String,
    pub dish_photo: Option<String>,
    pub instructions: Vec<Step>,
    pub ingredients: Vec<String>,
}

impl RecipeDetails {
    /// Converts a record fetched from the random-recipes endpoint.
    #[must_use]
    pub fn from_random_record(raw: &RawRecipe) -> Self {
        Self {
            dish_name: raw.title.clone(),
            dish_photo: raw.image.clone(),
            instructions: raw.steps().to_vec(),
            ingredients: raw
                .extended_ingredients
                .iter()
                .map(|i| i.original.clone())
                .collect(),
        }
    }

    /// Converts a record fetched from the search endpoint.
    #[must_use]
    pub fn from_search_record(raw: &RawRecipe) -> Self {
        let steps = raw.steps();
        Self {
            dish_name: raw.title.clone(),
            dish_photo: raw.image.clone(),
            instructions: steps.to_vec(),
            ingredients: steps
                .iter()
                .flat_map(|s| s.ingredients.iter().map(|i| i.name.clone()))
                .collect(),
        }
    }

    #[must_use]
    pub fn from_slot(slot: Slot, raw: &RawRecipe) -> Self {
        match slot.ingredient_source() {
            IngredientSource::Extended => Self::from_random_record(raw),
            IngredientSource::InstructionSteps => Self::from_search_record(raw),
        }
    }
}
