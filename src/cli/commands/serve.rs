use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace, warn};

use crate::config::{initialize_app_state, Settings};
use crate::router::create_router;
use crate::schemas::AppState;

/// One-line description of what the server will answer from.
pub fn describe_state(state: &AppState) -> String {
    let categories = state.dataset.categories();
    let years = match state.dataset.year_range() {
        Some((first, last)) => format!("{first}-{last}"),
        None => "no years".to_string(),
    };
    format!(
        "{} records in {} categories ({}), projecting to {}, location data for {} categories",
        state.dataset.len(),
        categories.len(),
        years,
        state.trend.target_year,
        state.locations.categories().len()
    )
}

pub async fn serve(settings: Settings) -> Result<()> {
    trace!("Entering serve function");
    info!(
        "Crimecast starting with dataset {}",
        settings.dataset_path.display()
    );

    let state = initialize_app_state(&settings).inspect_err(|e| {
        error!("Failed to initialize application state: {:#}", e);
    })?;
    info!("Serving {}", describe_state(&state));
    if state.dataset.is_empty() {
        warn!("Dataset is empty; every prediction will be an all-zero profile");
    }
    for category in state.dataset.categories() {
        debug!("Category '{}': {} records", category.name, category.records);
    }

    let app = create_router(state);

    trace!("Binding TCP listener to {}", settings.bind_address);
    let listener = TcpListener::bind(&settings.bind_address)
        .await
        .inspect_err(|e| error!("Failed to bind to address {}: {}", settings.bind_address, e))
        .with_context(|| format!("Failed to bind {}", settings.bind_address))?;

    info!("Input form available at http://{}/", settings.bind_address);
    info!("OpenAPI document available at http://{}/api-docs/openapi.json", settings.bind_address);

    axum::serve(listener, app)
        .await
        .inspect_err(|e| error!("Server error: {}", e))?;

    info!("Server shutdown gracefully");
    Ok(())
}
