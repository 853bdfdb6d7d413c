//! Mood Analysis API Server
//!
//! REST surface for the mood fusion pipeline: mood analysis, history, and
//! guardian profile endpoints.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod rate_limit;
mod routes;
mod settings;
mod validate;

pub use error::ApiError;
pub use settings::Settings;

use fallback::{RuleBasedClassifier, TextMoodClassifier};
use guardian::{GuardianConfig, GuardianEvaluator, LoggingDispatcher};
use storage::InMemoryStore;

/// Application state shared across handlers
pub struct AppState {
    /// In-memory store backing history and guardian profiles
    pub store: Arc<InMemoryStore>,
    /// Text/voice classifier collaborator
    pub classifier: Arc<dyn TextMoodClassifier>,
    /// Guardian alert evaluator
    pub evaluator: Arc<GuardianEvaluator>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// State with default wiring: rule-based classifier, logging alert
    /// dispatcher, no alert cooldown.
    pub fn new() -> Self {
        Self::with_classifier(Arc::new(RuleBasedClassifier::new()), GuardianConfig::default())
    }

    /// State for a loaded settings file.
    pub fn from_settings(settings: &Settings) -> Self {
        let guardian_config = GuardianConfig {
            cooldown_seconds: settings.guardian_cooldown_seconds,
            ..Default::default()
        };
        Self::with_classifier(Arc::new(RuleBasedClassifier::new()), guardian_config)
    }

    /// State with an injected classifier collaborator.
    pub fn with_classifier(
        classifier: Arc<dyn TextMoodClassifier>,
        guardian_config: GuardianConfig,
    ) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let evaluator = Arc::new(GuardianEvaluator::new(
            guardian_config,
            store.clone(),
            store.clone(),
            Arc::new(LoggingDispatcher),
        ));
        Self {
            store,
            classifier,
            evaluator,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub metrics: SystemMetrics,
}

/// System metrics
#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    pub history_count: usize,
    pub guardian_profile_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/analyze-mood", post(routes::analyze::analyze_mood))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/history", get(routes::history::get_history))
        .route(
            "/api/v1/guardian",
            get(routes::guardian_profile::get_profile)
                .put(routes::guardian_profile::update_profile),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        metrics: SystemMetrics {
            history_count: state.store.history_count(),
            guardian_profile_count: state.store.profile_count(),
        },
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::from_settings(&settings));

    let prometheus = PrometheusBuilder::new().install_recorder()?;
    let governor_config = rate_limit::create_governor_config(&settings);

    let app = create_router(state)
        .route(
            "/metrics",
            get(move || async move { prometheus.render() }),
        )
        .layer(GovernorLayer {
            config: governor_config,
        });

    info!("Starting API server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
