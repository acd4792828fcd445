// In crates/web-server/src/lib.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use api_client::PriceSource;
use app_config::ServerSettings;
use axum::{extract::State, response::Json, routing::get, Router};
use engine::ChartPayload;
use tokio::net::TcpListener;
use tower_http::services::ServeFile;

pub mod error;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
///
/// Nothing computed by a request is kept here; every `/data` call starts from a fresh fetch.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PriceSource>,
    /// Where to write the debug CSV dump, if enabled.
    pub csv_dump: Option<PathBuf>,
}

impl AppState {
    pub fn new(source: Arc<dyn PriceSource>, csv_dump: Option<PathBuf>) -> Self {
        Self { source, csv_dump }
    }
}

/// Creates the main application router with all routes and middleware.
///
/// # Arguments
///
/// * `app_state`: The shared `AppState` holding the price source.
/// * `static_dir`: Directory containing `index.html` and `main.js`.
pub fn create_router(app_state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();

    // The chart page is a local demo tool, so any origin may call the API.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/main.js", ServeFile::new(static_dir.join("main.js")))
        .route("/data", get(get_data_handler))
        .route("/health", get(health_check_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /data`.
/// Fetches the price series, runs the pipeline and returns rows plus chart metadata.
async fn get_data_handler(State(state): State<AppState>) -> Result<Json<ChartPayload>> {
    let symbol = state.source.symbol().clone();
    let bars = state.source.fetch_daily_bars().await?;
    tracing::info!(symbol = %symbol, bars = bars.len(), "Computing chart data.");

    let (series, payload) = engine::compute_chart(bars)?;

    if let Some(path) = state.csv_dump.clone() {
        write_dump(path, series).await;
    }

    Ok(Json(payload))
}

/// Writes the debug dump off the async runtime. Failures are logged, never returned.
async fn write_dump(path: PathBuf, series: engine::AugmentedSeries) {
    let target = path.clone();
    match tokio::task::spawn_blocking(move || engine::dump::write_csv(&target, &series)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, path = %path.display(), "Could not write the CSV dump."),
        Err(e) => tracing::warn!(error = %e, path = %path.display(), "CSV dump task failed."),
    }
}

/// The main entry point for running the web server.
///
/// This function sets up the TCP listener and serves the application router.
/// It will run forever until the process is terminated.
pub async fn run(settings: &ServerSettings, app_state: AppState) -> Result<()> {
    let app = create_router(app_state, &settings.static_dir);

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Web server listening on http://{}", address);

    axum::serve(listener, app).await.map_err(Error::Serve)?;

    Ok(())
}
