use crate::exposition;
use anyhow::Result;
use arrgauge_collector::CollectorRegistry;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

/// State shared by the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CollectorRegistry>,
}

impl AppState {
    pub fn new(registry: CollectorRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

/// Start the HTTP server
pub async fn serve(addr: &str, registry: CollectorRegistry) -> Result<()> {
    let app = create_router(AppState::new(registry));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Metrics server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Create the HTTP router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/healthz", get(health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .with_state(state)
}

/// Scrape every collector and render the result. Always answers 200; failed
/// collectors show up as their error gauge.
async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let collections = state.registry.scrape().await;
    let body = exposition::render(&collections);

    ([(header::CONTENT_TYPE, exposition::CONTENT_TYPE)], body)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "arrgauge",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
