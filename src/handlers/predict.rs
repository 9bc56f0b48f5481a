use axum::{extract::State, response::Html, Form};
use tracing::{debug, info, instrument, trace};
use crate::error::AppError;
use crate::helpers::html::prediction_fragment;
use crate::schemas::{AppState, PredictForm};

/// Predict the hourly crime profile for a month, day and category
///
/// Returns an HTML fragment embedding the chart as a `data:` URI. Unknown
/// categories and out-of-range dates produce an all-zero chart rather than
/// an error.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "prediction",
    request_body(content = PredictForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "HTML fragment with the embedded chart", body = String, content_type = "text/html"),
        (status = 400, description = "Month or day is not an integer", body = String, content_type = "text/html"),
        (status = 422, description = "Not enough yearly data to fit a trend", body = String, content_type = "text/html"),
        (status = 500, description = "Chart rendering failed", body = String, content_type = "text/html")
    )
)]
#[instrument(skip(state))]
pub async fn predict(
    State(state): State<AppState>,
    Form(form): Form<PredictForm>,
) -> Result<Html<String>, AppError> {
    trace!("Entering predict function");

    let request = form.into_request()?;
    debug!(
        "Predicting for category '{}' on month {} day {}",
        request.category, request.month, request.day
    );

    let prediction = compute::predict(&state.dataset, &request, &state.trend)?;
    let chart = state.renderer.render(&prediction.profile)?;

    info!(
        "Prediction served for '{}' ({} matching records, chart {} bytes)",
        prediction.category,
        prediction.matched_records,
        chart.bytes().len()
    );
    Ok(Html(prediction_fragment(&prediction, &chart.data_uri())))
}
