//! Scroll smoothing engine.
//!
//! Converts bursty raw wheel deltas into a bounded stream of per-tick pixel
//! deltas. Raw deltas land in an accumulator; every tick releases a damped
//! fraction of it, clamped to a per-frame cap and floored to a minimum
//! visible magnitude, so a large burst decays smoothly over several ticks
//! while small residues still produce motion instead of sticking.
//!
//! All engine state lives on one dedicated worker task ([`ScrollEngine`]);
//! [`ScrollEngine::enqueue`] and [`ScrollEngine::reconfigure`] are
//! fire-and-forget channel sends, so the report-delivery path never blocks
//! on the engine.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod engine;
pub mod sink;
pub mod state;

pub use engine::ScrollEngine;
pub use sink::{ScrollSink, SinkError};
pub use state::EngineState;
