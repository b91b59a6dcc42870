//! OS signal handling.
//!
//! Ctrl-C (SIGINT) cancels the running resolution or watch loop.

use crate::lifecycle::Cancellation;

/// Spawn a task that cancels `cancel` on the first Ctrl-C.
pub fn cancel_on_ctrl_c(cancel: Cancellation) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupt received, cancelling");
                cancel.cancel();
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });
}
