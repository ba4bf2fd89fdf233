//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Stops background tasks started for a run and waits for them to exit.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        if let Err(e) = logging_task.await {
            log::warn!("Progress logger ended abnormally: {e}");
        }
    }
}

/// Resolves on Ctrl-C, for use as an `axum` graceful shutdown signal.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install Ctrl-C handler: {e}");
        // Without a handler there is nothing to wait for; never resolve
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
