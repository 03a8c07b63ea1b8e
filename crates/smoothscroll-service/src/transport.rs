//! Transport port between the daemon and the OS HID layer.

use async_trait::async_trait;
use hid_wheel_protocol::REPORT_LEN;
use thiserror::Error;
use tokio::sync::mpsc;

/// Opaque identifier for one attached peripheral (the platform device path).
pub type DeviceId = String;

/// Events delivered by a [`WheelTransport`], off the engine's thread.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A matching peripheral appeared.
    Attached {
        id: DeviceId,
        product: Option<String>,
    },
    /// The peripheral went away. Its session is torn down; its engine may
    /// keep ticking idle.
    Detached { id: DeviceId },
    /// One raw input report. Length is whatever the transport delivered;
    /// the codec decides whether it is a valid frame.
    Report { id: DeviceId, data: Vec<u8> },
}

/// Transport failures.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HID subsystem cannot be opened at all. Fatal at process start:
    /// the daemon has no useful work without it.
    #[error("cannot attach to the HID subsystem: {0}")]
    Unavailable(String),

    /// An outbound report could not be handed to the device. Non-fatal.
    #[error("write to device {id} failed: {reason}")]
    Write { id: DeviceId, reason: String },
}

/// Contract the OS device layer implements for the daemon.
///
/// The transport delivers attach/detach/report events asynchronously on the
/// returned channel and accepts best-effort outbound reports. It never calls
/// back into the daemon.
#[async_trait]
pub trait WheelTransport: Send + Sync {
    /// Open the device subsystem and start delivering events.
    ///
    /// # Errors
    ///
    /// [`TransportError::Unavailable`] when the subsystem cannot be opened;
    /// the caller treats this as fatal.
    async fn start(&mut self) -> Result<mpsc::UnboundedReceiver<TransportEvent>, TransportError>;

    /// Queue one outbound report (host→device config push). Best-effort and
    /// non-blocking; delivery failures past this point are logged by the
    /// transport, not surfaced.
    ///
    /// # Errors
    ///
    /// [`TransportError::Write`] when the report cannot even be queued.
    fn send_report(&self, id: &DeviceId, report: &[u8; REPORT_LEN]) -> Result<(), TransportError>;
}
