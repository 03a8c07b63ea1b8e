//! Engine worker task and its command channel.

use std::sync::Arc;
use std::time::Duration;

use smoothscroll_config::SmoothingConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, trace, warn};

use crate::sink::ScrollSink;
use crate::state::EngineState;

enum Command {
    Enqueue(i16),
    Reconfigure { step_pixels: u8, interval_ms: u8 },
}

/// Handle to the scroll engine worker.
///
/// All engine state lives on one spawned task; this handle only holds the
/// command channel. [`enqueue`](Self::enqueue) and
/// [`reconfigure`](Self::reconfigure) are non-blocking sends and may be
/// called from any thread, including OS report-delivery callbacks. Commands
/// are applied in FIFO order relative to each other.
pub struct ScrollEngine {
    tx: mpsc::UnboundedSender<Command>,
    worker: JoinHandle<()>,
}

impl ScrollEngine {
    /// Start the engine with a sanitized copy of `config`, emitting through
    /// `sink` on every productive tick. The periodic timer starts
    /// immediately and runs whether or not a peripheral is attached.
    #[must_use]
    pub fn spawn(config: &SmoothingConfig, sink: Arc<dyn ScrollSink>) -> Self {
        let state = EngineState::from_config(config);
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(state, rx, sink));
        Self { tx, worker }
    }

    /// Hand a raw wheel delta to the engine. Never blocks; a delta sent
    /// after shutdown is silently dropped.
    pub fn enqueue(&self, vertical: i16) {
        if self.tx.send(Command::Enqueue(vertical)).is_err() {
            trace!(vertical, "engine stopped, scroll delta dropped");
        }
    }

    /// Apply an abbreviated runtime update. Zero fields are ignored; a new
    /// interval restarts the periodic timer with a fresh phase.
    pub fn reconfigure(&self, step_pixels: u8, interval_ms: u8) {
        if self
            .tx
            .send(Command::Reconfigure {
                step_pixels,
                interval_ms,
            })
            .is_err()
        {
            trace!("engine stopped, reconfigure dropped");
        }
    }

    /// Stop the engine: cancels the periodic timer and discards any pending
    /// accumulator value. Completes once the worker has exited.
    pub async fn shutdown(self) {
        drop(self.tx);
        if self.worker.await.is_err() {
            warn!("engine worker panicked during shutdown");
        }
    }

    /// Whether the worker task is still alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.worker.is_finished()
    }
}

fn new_ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    // Timing regularity over catch-up: a stalled tick is dropped output,
    // not a burst of make-up ticks.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

async fn run(
    mut state: EngineState,
    mut rx: mpsc::UnboundedReceiver<Command>,
    sink: Arc<dyn ScrollSink>,
) {
    let mut ticker = new_ticker(state.frame_interval());
    debug!(interval = ?state.frame_interval(), "scroll engine started");

    loop {
        tokio::select! {
            // Commands first, so report-path input and reconfiguration keep
            // their FIFO order relative to ticks already due.
            biased;

            cmd = rx.recv() => match cmd {
                Some(Command::Enqueue(vertical)) => state.enqueue(vertical),
                Some(Command::Reconfigure { step_pixels, interval_ms }) => {
                    debug!(step_pixels, interval_ms, "live reconfigure");
                    if state.apply_update(step_pixels, interval_ms) {
                        ticker = new_ticker(state.frame_interval());
                    }
                }
                None => break,
            },

            _ = ticker.tick() => {
                if let Some(delta) = state.drain() {
                    #[allow(clippy::cast_possible_truncation, reason = "delta is cap-bounded")]
                    let pixels = delta.round() as i32;
                    trace!(delta, pixels, "tick release");
                    if let Err(err) = sink.post_scroll(pixels) {
                        // Accumulator is already decremented: dropped output,
                        // never re-queued.
                        warn!(error = %err, pixels, "scroll emission failed");
                    }
                }
            }
        }
    }

    debug!("scroll engine stopped");
}
