//! OS signal handling.

use crate::lifecycle::shutdown::ShutdownSignal;

/// Resolve on Ctrl+C or when `shutdown` fires, whichever comes first.
pub async fn shutdown_signal(mut shutdown: ShutdownSignal) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                // Fall back to the coordinator alone.
                shutdown.recv().await;
            }
        }
        _ = shutdown.recv() => {}
    }
    tracing::info!("Shutdown signal received");
}
