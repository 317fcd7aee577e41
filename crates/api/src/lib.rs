//! Flight Delay API Server
//!
//! REST boundary around the encode/predict pipeline. Handlers validate the
//! raw attribute triples against the fixed catalogs before anything reaches
//! the core, mirror the upstream wire contract (`OPERA`/`TIPOVUELO`/`MES`
//! in, `{"predict": [...]}` out), and map every validation failure to a 400
//! with a `detail` message.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod rate_limit;
mod routes;

pub use config::ApiConfig;
pub use rate_limit::RateLimitConfig;

use delay_model::DelayClassifier;
use feature_encoder::FeatureEncoder;
use flight_data::Validator;
use prediction_log::Repository;

/// Application state shared across handlers.
///
/// The classifier is fitted or loaded before serving starts and only read
/// afterwards; retraining replaces it under the write lock, atomically for
/// concurrent readers.
pub struct AppState {
    /// Trained (or fallback) classifier
    pub classifier: DelayClassifier,
    /// Stateless feature encoder
    pub encoder: FeatureEncoder,
    /// Inbound attribute validation
    pub validator: Validator,
    /// Log of served predictions
    pub log: Repository,
    /// Serving configuration
    pub config: ApiConfig,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create state with an untrained classifier.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_classifier(config, DelayClassifier::new())
    }

    /// Create state around an existing classifier.
    pub fn with_classifier(config: ApiConfig, classifier: DelayClassifier) -> Self {
        Self {
            classifier,
            encoder: FeatureEncoder::new(),
            validator: Validator::new(),
            log: Repository::new(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Shared handle to the application state.
pub type SharedState = Arc<RwLock<AppState>>;

/// Errors surfaced to HTTP clients as `{"detail": ...}` bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-side problem; never retried
    #[error("{0}")]
    BadRequest(String),
    /// Untrained model with the fallback disabled
    #[error("{0}")]
    ServiceUnavailable(String),
    /// Opaque internal failure
    #[error("Prediction error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model_trained: bool,
    pub predictions_served: usize,
}

/// Create the application router.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/predict", post(routes::predict::post_predict))
        .route("/predictions", get(routes::history::get_predictions))
        .with_state(state)
}

/// Health check handler.
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    Json(HealthResponse {
        status: "OK".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model_trained: state.classifier.is_trained(),
        predictions_served: state.log.count(),
    })
}

/// Initialize logging. Call once per process.
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server until shutdown.
///
/// Loads the model blob named by the config (serving the untrained
/// fallback when none is configured), installs the Prometheus recorder,
/// and wires rate limiting plus request tracing around the router.
pub async fn run_server(config: ApiConfig) -> anyhow::Result<()> {
    let classifier = match &config.model_path {
        Some(path) => DelayClassifier::load(path)?,
        None => {
            warn!("no model path configured; serving untrained fallback");
            DelayClassifier::new()
        }
    };

    let addr = config.bind_addr.clone();
    let governor_config = rate_limit::create_governor_config(&config.rate_limit);
    let state = Arc::new(RwLock::new(AppState::with_classifier(config, classifier)));

    let metrics_handle = PrometheusBuilder::new().install_recorder()?;
    let app = create_router(state)
        .route(
            "/metrics",
            get(move || std::future::ready(metrics_handle.render())),
        )
        .layer(GovernorLayer {
            config: governor_config,
        })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
