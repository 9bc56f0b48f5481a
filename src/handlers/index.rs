use axum::{extract::State, response::Html};
use tracing::{debug, instrument};
use crate::helpers::html::input_form;
use crate::schemas::AppState;

/// Input form for a prediction
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let categories = state.dataset.categories();
    debug!("Rendering input form with {} categories", categories.len());
    Html(input_form(&categories))
}
