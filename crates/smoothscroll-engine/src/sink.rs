//! Output boundary of the engine.

use thiserror::Error;

/// Error from a [`ScrollSink`] declining to post an event.
///
/// The engine treats this as dropped output: the accumulator has already
/// been decremented, and the delta is not re-queued.
#[derive(Error, Debug)]
#[error("scroll event rejected: {0}")]
pub struct SinkError(pub String);

/// Consumer of the engine's per-tick pixel output.
///
/// Called at most once per tick, from the engine's worker task, with the
/// rounded pixel delta. Implementations construct the OS-level scroll event;
/// there is no feedback channel back into the engine.
///
/// `post_scroll` must be non-blocking and quick: it runs on the tick path
/// and a slow sink delays every subsequent tick.
pub trait ScrollSink: Send + Sync {
    /// Post one continuous-scroll step of `pixels` to the host.
    ///
    /// # Errors
    ///
    /// [`SinkError`] when the event cannot be posted; the engine logs it and
    /// moves on.
    fn post_scroll(&self, pixels: i32) -> Result<(), SinkError>;
}
