use super::ApiError;
use crate::domain::{FilterKind, RecipeId, Slot};

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }
    Ok(trimmed)
}

pub fn parse_slot(raw: &str) -> Result<Slot, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::validation(format!("{e}. Slot must be one of 1, 2, 3, 4")))
}

pub fn parse_filter_kind(raw: &str) -> Result<FilterKind, ApiError> {
    raw.parse().map_err(|e| ApiError::validation(format!("{e}")))
}

/// Trims every value and drops blanks; at least one must remain.
pub fn validate_filter_values(values: Vec<String>) -> Result<Vec<String>, ApiError> {
    let values: Vec<String> = values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        return Err(ApiError::validation("Select at least one filter option"));
    }
    Ok(values)
}

pub fn validate_recipe_id(id: i32) -> Result<RecipeId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid recipe ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(RecipeId::new(id))
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(())
}
