//! HTTP front end
//!
//! `POST /blastn` and `POST /blastp` run searches and answer with the HTML
//! report; failures are answered with `{"status": "error", "message": ...}`
//! and status 400 (request problems) or 500 (server problems).

pub mod handlers;
pub mod response;
pub mod state;

pub use response::{ApiError, ErrorBody};
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use blastgate_core::{BlastgateResult, Config};
use blastgate_utils::purge_stale_workspaces;
use std::time::Duration;

/// Workspaces older than this are left over from a previous process
const STALE_WORKSPACE_AGE: Duration = Duration::from_secs(60 * 60);

/// Age past which a workspace cannot belong to a running search
fn stale_workspace_age(timeout: Duration) -> Duration {
    STALE_WORKSPACE_AGE.max(timeout.checked_mul(2).unwrap_or(Duration::MAX))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/blastn", post(handlers::blastn))
        .route("/blastp", post(handlers::blastp))
        .route("/health", get(handlers::health))
        .route("/databases", get(handlers::databases))
        .with_state(state)
}

/// Bind the configured address and serve until interrupted
pub async fn serve(config: Config) -> BlastgateResult<()> {
    let age = stale_workspace_age(config.search.timeout());
    if let Err(e) = purge_stale_workspaces(&config.workspace.root, age) {
        tracing::warn!("Could not purge old workspaces: {}", e);
    }

    let address = config.bind_address();
    let state = AppState::from_config(config);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
