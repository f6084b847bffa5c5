use axum::{Json, extract::Path};

use super::{ApiError, ApiResponse, FilterCatalogDto, validation};
use crate::domain::FilterKind;

/// GET /filters
pub async fn list_filters() -> Json<ApiResponse<Vec<FilterCatalogDto>>> {
    let catalogs = [FilterKind::Intolerances, FilterKind::Cuisine, FilterKind::Diet]
        .into_iter()
        .map(FilterCatalogDto::from)
        .collect();
    Json(ApiResponse::success(catalogs))
}

/// GET /filters/{kind}
pub async fn get_filter(
    Path(kind): Path<String>,
) -> Result<Json<ApiResponse<FilterCatalogDto>>, ApiError> {
    let kind = validation::parse_filter_kind(&kind)?;
    Ok(Json(ApiResponse::success(kind.into())))
}
