//! Shutdown signal handling for panel sessions

use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancelled on SIGINT or SIGTERM
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Token cancelled when shutdown is requested
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Request shutdown from inside the application
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// Wait until shutdown is requested
    pub async fn wait(&self) {
        self.token.cancelled().await
    }

    /// Setup signal handlers
    pub fn setup(&self) -> Result<(), std::io::Error> {
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        let token = self.token.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = sigint.recv() => info!("Received SIGINT (shutdown)"),
                _ = sigterm.recv() => info!("Received SIGTERM (shutdown)"),
                _ = token.cancelled() => return,
            }
            token.cancel();
        });

        Ok(())
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_signal_default_is_false() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_shutdown());
    }

    #[test]
    fn shutdown_signal_can_be_triggered() {
        let signal = ShutdownSignal::new();
        let token = signal.token();
        signal.trigger();
        assert!(signal.is_shutdown());
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn wait_returns_after_trigger() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.wait().await;
    }

    #[tokio::test]
    async fn setup_installs_handlers() {
        let signal = ShutdownSignal::new();
        signal.setup().unwrap();
        assert!(!signal.is_shutdown());
        signal.trigger();
    }
}
