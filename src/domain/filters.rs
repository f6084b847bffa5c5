use serde::Serialize;
use std::str::FromStr;

pub const INTOLERANCES: &[&str] = &[
    "Dairy", "Egg", "Gluten", "Grain", "Peanut", "Seafood", "Sesame", "Shellfish", "Soy",
    "Sulfite", "Tree Nut", "Wheat",
];

pub const CUISINES: &[&str] = &[
    "African",
    "Asian",
    "American",
    "British",
    "Cajun",
    "Caribbean",
    "Chinese",
    "Eastern European",
    "European",
    "French",
    "German",
    "Greek",
    "Indian",
    "Irish",
    "Italian",
    "Japanese",
    "Jewish",
    "Korean",
    "Latin American",
    "Mediterranean",
    "Mexican",
    "Middle Eastern",
    "Nordic",
    "Southern",
    "Spanish",
    "Thai",
    "Vietnamese",
];

pub const DIETS: &[&str] = &[
    "Gluten Free",
    "Ketogenic",
    "Vegetarian",
    "Lacto-Vegetarian",
    "Ovo-Vegetarian",
    "Vegan",
    "Pescetarian",
    "Paleo",
    "Primal",
    "Low FODMAP",
    "Whole30",
];

/// The facet a filtered search narrows on. Values are forwarded to the API
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Intolerances,
    Cuisine,
    Diet,
}

impl FilterKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Intolerances => "Intolerances",
            Self::Cuisine => "Cuisine Type",
            Self::Diet => "Diet Type",
        }
    }

    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::Intolerances => INTOLERANCES,
            Self::Cuisine => CUISINES,
            Self::Diet => DIETS,
        }
    }

    /// Query parameter name used by the search endpoint.
    #[must_use]
    pub const fn query_param(self) -> &'static str {
        match self {
            Self::Intolerances => "intolerances",
            Self::Cuisine => "cuisine",
            Self::Diet => "diet",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown filter type: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for FilterKind {
    type Err = UnknownFilter;

    /// Accepts the numeric form codes (`1`..`3`) as well as the names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "intolerances" => Ok(Self::Intolerances),
            "2" | "cuisine" => Ok(Self::Cuisine),
            "3" | "diet" => Ok(Self::Diet),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_codes_and_names() {
        assert_eq!("1".parse::<FilterKind>().unwrap(), FilterKind::Intolerances);
        assert_eq!("Cuisine".parse::<FilterKind>().unwrap(), FilterKind::Cuisine);
        assert_eq!(" diet ".parse::<FilterKind>().unwrap(), FilterKind::Diet);
        assert!("4".parse::<FilterKind>().is_err());
    }

    #[test]
    fn catalogs_are_non_empty() {
        for kind in [FilterKind::Intolerances, FilterKind::Cuisine, FilterKind::Diet] {
            assert!(!kind.options().is_empty(), "{}", kind.label());
        }
    }
}
