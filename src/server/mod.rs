//! HTTP API for the redirect walker.
//!
//! Provides two endpoints:
//! - `POST /api/redirects` - walk one or more URLs and return their reports
//! - `GET /health` - liveness check

mod handlers;
mod types;

use std::sync::Arc;

use anyhow::{bail, Context};
use axum::routing::{get, post};
use axum::Router;

use crate::app::{print_statistics, shutdown_signal};
use crate::config::Config;
use crate::fetch::ReqwestProbe;
use crate::initialization::init_probe_client;
use crate::run::BatchOptions;

use handlers::{health_handler, redirects_handler};
pub use types::{AppState, ErrorResponse, RedirectRequest, RedirectResponse, SharedProbe};

/// Builds the API router around injected state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/redirects", post(redirects_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Serves the API on `bind` with the real probe until Ctrl-C.
pub async fn serve(config: &Config, bind: &str) -> Result<(), anyhow::Error> {
    if config.max_hops == 0 {
        bail!("--max-hops must be at least 1");
    }

    let client = init_probe_client(config).context("Failed to initialize HTTP client")?;
    let probe = ReqwestProbe::new(client).block_private_targets(!config.allow_private);
    let state = AppState::new(probe, config.walk_options(), BatchOptions::from(config));
    let stats = Arc::clone(&state.stats);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind redirect API to {}: {}", bind, e))?;

    log::info!("Redirect API listening on http://{}/", bind);
    log::info!("  - Walk: POST http://{}/api/redirects", bind);
    log::info!("  - Health: GET http://{}/health", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Redirect API server error: {}", e))?;

    print_statistics(&stats);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_rejects_zero_max_hops() {
        let config = Config {
            max_hops: 0,
            ..Default::default()
        };
        let err = serve(&config, "127.0.0.1:0")
            .await
            .expect_err("zero hops must fail");
        assert!(err.to_string().contains("max-hops"));
    }

    #[tokio::test]
    async fn test_serve_reports_bind_failure() {
        crate::initialization::init_crypto_provider();
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = taken.local_addr().expect("addr").to_string();

        let err = serve(&Config::default(), &addr)
            .await
            .expect_err("port in use must fail");
        assert!(err.to_string().contains("Failed to bind redirect API"));
    }
}
