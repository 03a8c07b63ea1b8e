//! smooth-scrolld — bridges the raw-HID scroll wheel to continuous scrolling.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use smoothscroll_config::{SmoothingConfig, default_config_path};
use smoothscroll_service::{Daemon, HidApiTransport, LogScrollSink, TransportError};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("smoothscroll=debug,info")
        .init();

    info!("starting smooth-scrolld v{}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(default_config_path);
    let config = match &config_path {
        Some(path) => SmoothingConfig::load_or_default(path),
        None => {
            warn!("no config location available, using defaults");
            SmoothingConfig::default().sanitize()
        }
    };
    info!(
        step = config.host_step_pixels,
        interval_ms = config.host_interval_ms,
        damping = config.damping,
        max_step = config.max_step_per_frame,
        min_output = config.minimum_output_magnitude,
        "effective smoothing config"
    );

    let daemon = Daemon::new(config, HidApiTransport::new(), Arc::new(LogScrollSink));
    if let Err(err) = daemon.run().await {
        error!("daemon failed: {err:#}");
        // Failing to open the device subsystem at all gets its own exit
        // status so a supervisor can tell it from a runtime failure.
        let status = match err.downcast_ref::<TransportError>() {
            Some(TransportError::Unavailable(_)) => 2,
            _ => 1,
        };
        process::exit(status);
    }

    info!("smooth-scrolld stopped");
}
