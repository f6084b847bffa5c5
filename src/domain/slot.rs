use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::IngredientSource;

/// Fixed key under which the last API response of one use case is cached.
///
/// The wire representation is the literal strings `"1"` to `"4"`; these are
/// shared with the URLs handed to clients and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Results of a search by dish name.
    NamedSearch,
    /// Random batch shown on the home page.
    HomeBatch,
    /// Results of an intolerance/cuisine/diet search.
    FilteredSearch,
    /// A single random recipe.
    RandomPick,
}

impl Slot {
    pub const ALL: [Self; 4] = [
        Self::NamedSearch,
        Self::HomeBatch,
        Self::FilteredSearch,
        Self::RandomPick,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NamedSearch => "1",
            Self::HomeBatch => "2",
            Self::FilteredSearch => "3",
            Self::RandomPick => "4",
        }
    }

    /// Which part of an API record lists the ingredients.
    ///
    /// The random endpoint returns `extendedIngredients`; search results only
    /// carry ingredients inside the analyzed instruction steps.
    #[must_use]
    pub const fn ingredient_source(self) -> IngredientSource {
        match self {
            Self::HomeBatch | Self::RandomPick => IngredientSource::Extended,
            Self::NamedSearch | Self::FilteredSearch => IngredientSource::InstructionSteps,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown cache slot: {0}")]
pub struct UnknownSlot(pub String);

impl FromStr for Slot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::NamedSearch),
            "2" => Ok(Self::HomeBatch),
            "3" => Ok(Self::FilteredSearch),
            "4" => Ok(Self::RandomPick),
            other => Err(UnknownSlot(other.to_string())),
        }
    }
}

impl Serialize for Slot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
