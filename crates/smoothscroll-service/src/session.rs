//! Device sessions: the 1:1 pairing between an attached peripheral and its
//! engine/codec.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use hid_wheel_protocol::{WheelMessage, decode, encode_config_push};
use smoothscroll_config::SmoothingConfig;
use smoothscroll_engine::{ScrollEngine, ScrollSink};
use tracing::{info, trace, warn};

use crate::transport::{DeviceId, TransportEvent, WheelTransport};

/// Routes transport events into per-device engines.
///
/// Each peripheral gets its own engine, spawned on first attach and revived
/// (not respawned) on re-attach: detaching tears down the session but leaves
/// the engine ticking idle, so a wheel that comes back keeps its runtime
/// overrides. Engines stop only at [`SessionManager::shutdown`].
pub struct SessionManager {
    config: SmoothingConfig,
    sink: Arc<dyn ScrollSink>,
    engines: HashMap<DeviceId, ScrollEngine>,
    attached: HashSet<DeviceId>,
}

impl SessionManager {
    #[must_use]
    pub fn new(config: SmoothingConfig, sink: Arc<dyn ScrollSink>) -> Self {
        Self {
            config: config.sanitize(),
            sink,
            engines: HashMap::new(),
            attached: HashSet::new(),
        }
    }

    /// Dispatch one transport event.
    pub fn handle_event(&mut self, transport: &dyn WheelTransport, event: TransportEvent) {
        match event {
            TransportEvent::Attached { id, product } => self.attach(transport, id, product),
            TransportEvent::Detached { id } => self.detach(&id),
            TransportEvent::Report { id, data } => self.route_report(&id, &data),
        }
    }

    fn attach(&mut self, transport: &dyn WheelTransport, id: DeviceId, product: Option<String>) {
        info!(
            device = %id,
            product = product.as_deref().unwrap_or("unknown"),
            "raw HID wheel attached"
        );
        self.attached.insert(id.clone());
        self.engines
            .entry(id.clone())
            .or_insert_with(|| ScrollEngine::spawn(&self.config, self.sink.clone()));

        // Best-effort: a wheel that misses the push just keeps its firmware
        // defaults until the next attach.
        let report = encode_config_push(
            self.config.device_step_pixels(),
            self.config.device_interval_ms(),
        );
        if let Err(err) = transport.send_report(&id, &report) {
            warn!(device = %id, error = %err, "failed to push configuration");
        }
    }

    fn detach(&mut self, id: &DeviceId) {
        if self.attached.remove(id) {
            info!(device = %id, "raw HID wheel detached");
        }
    }

    fn route_report(&mut self, id: &DeviceId, data: &[u8]) {
        let Some(engine) = self.engines.get(id) else {
            trace!(device = %id, "report for unknown device dropped");
            return;
        };
        match decode(data) {
            Some(WheelMessage::ScrollDelta { vertical }) => engine.enqueue(vertical),
            Some(WheelMessage::ConfigPush {
                step_pixels,
                interval_ms,
            }) => engine.reconfigure(step_pixels, interval_ms),
            // Tolerant-parser policy: not an error, not worth a warning.
            None => trace!(device = %id, len = data.len(), "unrecognized report dropped"),
        }
    }

    /// Number of peripherals currently attached.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Number of engines alive (attached or parked idle).
    #[must_use]
    pub fn engine_count(&self) -> usize {
        self.engines.len()
    }

    /// Stop every engine. Pending accumulator values are discarded.
    pub async fn shutdown(self) {
        for (id, engine) in self.engines {
            trace!(device = %id, "stopping engine");
            engine.shutdown().await;
        }
    }
}
