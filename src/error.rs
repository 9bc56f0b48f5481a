use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use compute::ComputeError;
use render::RenderError;
use thiserror::Error;
use tracing::{error, warn};

use crate::helpers::html::error_fragment;

/// Errors a prediction request can end in.
///
/// Each variant maps to an HTML fragment with a client-visible status code.
#[derive(Error, Debug)]
pub enum AppError {
    /// A form field that must be an integer is not one
    #[error("Invalid value '{value}' for '{field}': expected an integer")]
    InvalidInput { field: &'static str, value: String },

    /// The prediction pipeline could not produce a projection
    #[error(transparent)]
    Compute(#[from] ComputeError),

    /// The chart could not be drawn
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::Compute(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput { .. } => self.to_string(),
            AppError::Compute(err) => format!("Insufficient data for a prediction: {}", err),
            AppError::Render(_) => "Failed to render the prediction chart".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Prediction request failed: {}", self);
        } else {
            warn!("Prediction request rejected: {}", self);
        }
        (status, Html(error_fragment(status, &self.public_message()))).into_response()
    }
}
