//! Smooth-scroll daemon library.
//!
//! Owns everything between the OS device layer and the scroll engine: the
//! transport port ([`WheelTransport`]), its hidapi implementation, and the
//! session manager pairing each attached peripheral with its engine. The
//! scroll-event injection mechanism stays behind
//! [`smoothscroll_engine::ScrollSink`]; this crate ships a tracing-backed
//! sink so the pipeline runs end to end on any platform.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod daemon;
pub mod hid;
pub mod inject;
pub mod session;
pub mod transport;

pub use daemon::Daemon;
pub use hid::HidApiTransport;
pub use inject::LogScrollSink;
pub use session::SessionManager;
pub use transport::{DeviceId, TransportError, TransportEvent, WheelTransport};
