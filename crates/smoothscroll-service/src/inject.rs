//! Scroll event injection boundary.
//!
//! Event injection is platform-specific (CGEvent tap on macOS, uinput on
//! Linux, `SendInput` on Windows) and plugs in behind
//! [`smoothscroll_engine::ScrollSink`]. The sink here emits each step to the
//! log stream instead, which keeps the full pipeline runnable and
//! observable on any platform.

use smoothscroll_engine::{ScrollSink, SinkError};
use tracing::debug;

/// Sink that logs every emitted scroll step.
pub struct LogScrollSink;

impl ScrollSink for LogScrollSink {
    fn post_scroll(&self, pixels: i32) -> Result<(), SinkError> {
        debug!(pixels, "scroll step");
        Ok(())
    }
}
