//! Daemon event loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use smoothscroll_config::SmoothingConfig;
use smoothscroll_engine::ScrollSink;
use tracing::{info, warn};

use crate::session::SessionManager;
use crate::transport::WheelTransport;

/// Wires the transport, the session manager, and the scroll sink together
/// and runs until the transport ends or the process is interrupted.
pub struct Daemon<T: WheelTransport> {
    config: SmoothingConfig,
    transport: T,
    sink: Arc<dyn ScrollSink>,
}

impl<T: WheelTransport> Daemon<T> {
    #[must_use]
    pub fn new(config: SmoothingConfig, transport: T, sink: Arc<dyn ScrollSink>) -> Self {
        Self {
            config: config.sanitize(),
            transport,
            sink,
        }
    }

    /// Run the daemon to completion.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`crate::TransportError`] when the HID
    /// subsystem cannot be opened; everything past startup is handled
    /// locally and logged.
    pub async fn run(mut self) -> Result<()> {
        let mut events = self
            .transport
            .start()
            .await
            .context("failed to open HID transport")?;
        info!("device transport started");

        let mut sessions = SessionManager::new(self.config, self.sink);

        let interrupt = tokio::signal::ctrl_c();
        tokio::pin!(interrupt);

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => sessions.handle_event(&self.transport, event),
                    None => {
                        warn!("transport event stream ended");
                        break;
                    }
                },
                _ = &mut interrupt => {
                    info!("interrupt received, shutting down");
                    break;
                }
            }
        }

        sessions.shutdown().await;
        Ok(())
    }
}
