//! Herd Manager - Backend Server
//!
//! Serves reproduction & care alerts and herd statistics computed from the
//! farm's materialized record collections.

use axum::{routing::get, Router};
use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;
mod services;


pub use config::Config;
use services::{DashboardService, DataSource, HerdStore, RecomputeWorker};
use shared::{AlertAggregator, HerdSnapshot};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: HerdStore,
    pub dashboard: DashboardService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: HerdStore, config: Config) -> Self {
        let dashboard =
            DashboardService::new(store.clone(), AlertAggregator::new(config.alerts.windows()));
        Self {
            store,
            dashboard,
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "herd_server=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Herd Manager Server");
    tracing::info!("Environment: {}", config.environment);

    // Load herd data; the sample herd stands in until a snapshot loads
    let store = if config.data.use_sample_data || config.data.snapshot_path.is_some() {
        HerdStore::sample()
    } else {
        HerdStore::new(HerdSnapshot::default(), DataSource::Pushed)
    };
    match &config.data.snapshot_path {
        Some(path) => {
            // Failure is logged and reported through isError
            let _ = store.load_file(Path::new(path)).await;
        }
        None => tracing::info!("No snapshot configured, waiting for collections"),
    }

    // Create application state
    let state = AppState::new(store.clone(), config.clone());

    // Recompute in the background whenever the collections change
    let quiescence = Duration::from_millis(config.alerts.recompute_quiescence_ms);
    RecomputeWorker::new(store, state.dashboard.clone(), quiescence).spawn();

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Herd Manager API v1.0"
}
