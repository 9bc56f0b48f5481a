use crate::handlers::{
    categories::get_categories,
    health::health_check,
    index::index,
    locations::{get_location_categories, get_locations},
    predict::predict,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Input form and prediction
        .route("/", get(index))
        .route("/predict", post(predict))
        // Health check
        .route("/health", get(health_check))
        // Dataset metadata
        .route("/api/v1/categories", get(get_categories))
        // Incident counts by place
        .route("/api/v1/locations", get(get_locations))
        .route("/api/v1/locations/categories", get(get_location_categories))
        // OpenAPI document
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
