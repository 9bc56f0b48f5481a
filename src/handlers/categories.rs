use axum::{extract::State, response::Json};
use tracing::{debug, instrument, trace};
use crate::schemas::{ApiResponse, AppState, CategoryResponse};

/// List the crime categories present in the dataset
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<CategoryResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_categories(State(state): State<AppState>) -> Json<ApiResponse<Vec<CategoryResponse>>> {
    trace!("Entering get_categories function");

    let categories: Vec<CategoryResponse> = state
        .dataset
        .categories()
        .into_iter()
        .map(CategoryResponse::from)
        .collect();
    debug!("Found {} categories", categories.len());

    Json(ApiResponse {
        data: categories,
        message: "Categories retrieved successfully".to_string(),
        success: true,
    })
}
