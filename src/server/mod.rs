//! HTTP application shell.
//!
//! Wires the review and history handlers into an axum router with CORS,
//! request tracing, and a JSON body size limit, and runs it until Ctrl-C.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::history::HistoryStore;
use crate::review::ReviewService;

/// Shared, read-mostly state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub reviews: ReviewService,
    pub history: Arc<HistoryStore>,
}

impl AppState {
    pub fn new(reviews: ReviewService, history: Arc<HistoryStore>) -> Self {
        Self { reviews, history }
    }
}

/// Build the application router.
pub fn router(state: AppState, body_limit: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/ai/get-review", post(handlers::get_review))
        .route(
            "/history",
            get(handlers::list_history).post(handlers::save_history),
        )
        .route(
            "/history/:id",
            get(handlers::get_history).delete(handlers::delete_history),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn serve(state: AppState, config: &ServerConfig) -> std::io::Result<()> {
    let app = router(state, config.body_limit);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "codelens listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
