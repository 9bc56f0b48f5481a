use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{debug, instrument, trace, warn};
use utoipa::IntoParams;

use crate::schemas::{ApiResponse, AppState, ErrorResponse, LocationResponse};

/// Query parameters for location aggregates
#[derive(Debug, Deserialize, IntoParams)]
pub struct LocationQuery {
    /// Category label, as derived from the location file name
    pub category: String,
    /// Only include incidents from this year
    pub year: Option<i32>,
}

/// Incident counts per place and year for one category
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    tag = "locations",
    params(LocationQuery),
    responses(
        (status = 200, description = "Location aggregates retrieved successfully", body = ApiResponse<Vec<LocationResponse>>),
        (status = 400, description = "Missing or invalid query parameters"),
        (status = 404, description = "No location data for the category", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<ApiResponse<Vec<LocationResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_locations function");

    let Some(summaries) = state.locations.aggregate(&query.category, query.year) else {
        warn!("No location data for category '{}'", query.category);
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No location data for category '{}'", query.category),
                code: "LOCATIONS_NOT_FOUND".to_string(),
                success: false,
            }),
        ));
    };
    debug!("Aggregated {} places for '{}'", summaries.len(), query.category);

    Ok(Json(ApiResponse {
        data: summaries.into_iter().map(LocationResponse::from).collect(),
        message: "Locations retrieved successfully".to_string(),
        success: true,
    }))
}

/// Categories that have location data
#[utoipa::path(
    get,
    path = "/api/v1/locations/categories",
    tag = "locations",
    responses(
        (status = 200, description = "Location categories retrieved successfully", body = ApiResponse<Vec<String>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_location_categories(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    let categories: Vec<String> = state.locations.categories().into_iter().map(str::to_string).collect();
    debug!("Found {} location categories", categories.len());

    Json(ApiResponse {
        data: categories,
        message: "Location categories retrieved successfully".to_string(),
        success: true,
    })
}
