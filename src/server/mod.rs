//! HTTP API
//!
//! `GET /` answers with a banner, `POST /api/analyze/` streams a summary.

mod routes;

pub use routes::{analyze_handler, root_handler, AnalyzeRequest};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::crawler::Fetcher;
use crate::llm::CompletionService;
use crate::pipeline::SummaryGenerator;
use crate::{BriefError, ConfigError};

/// Shared application state
///
/// Only immutable pieces live here. Every request runs its own crawl with a
/// fresh visited set and link list.
#[derive(Clone)]
pub struct AppState {
    pub generator: SummaryGenerator,
    pub app_name: Arc<str>,
}

impl AppState {
    pub fn new(config: &Config, fetcher: Fetcher, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            generator: SummaryGenerator::from_config(config, fetcher, completion),
            app_name: Arc::from(config.server.app_name.as_str()),
        }
    }
}

/// Builds the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/analyze/", post(analyze_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

/// Binds `config.server.bind` and serves until Ctrl-C
pub async fn serve(
    config: &Config,
    completion: Arc<dyn CompletionService>,
) -> Result<(), BriefError> {
    let fetcher = Fetcher::new(&config.crawler)?;
    let state = AppState::new(config, fetcher, completion);

    let addr: SocketAddr = config.server.bind.parse().map_err(|_| {
        ConfigError::Validation(format!("invalid bind address: {}", config.server.bind))
    })?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Starting {} Service on http://{}",
        config.server.app_name,
        addr
    );

    serve_with_shutdown(listener, state, shutdown_signal()).await?;
    Ok(())
}

/// Serves on an already bound listener until `shutdown` resolves
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app_name = state.app_name.clone();

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Shutting down {} Service", app_name);
    Ok(())
}

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, run until the process is killed
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
