//! Engine state and the per-tick release computation.

use std::time::Duration;

use smoothscroll_config::SmoothingConfig;

/// Accumulator magnitude at or below which a tick is a no-op.
const IDLE_THRESHOLD: f64 = 0.1;

/// Mutable smoothing state, owned exclusively by the engine worker task.
///
/// The drain math is synchronous and side-effect-free so it can be driven
/// directly in tests without a timer.
#[derive(Debug, Clone)]
pub struct EngineState {
    /// Running total of unreleased input delta.
    accumulator: f64,
    /// Fraction of the accumulator released per tick.
    damping: f64,
    /// Hard per-tick output cap.
    max_step_per_frame: f64,
    /// Smallest nonzero magnitude ever emitted.
    minimum_output_magnitude: f64,
    /// Current tick period.
    frame_interval: Duration,
}

impl EngineState {
    /// Build engine state from a sanitized host config.
    #[must_use]
    pub fn from_config(config: &SmoothingConfig) -> Self {
        let config = config.sanitize();
        Self {
            accumulator: 0.0,
            damping: config.damping,
            max_step_per_frame: config.max_step_per_frame,
            minimum_output_magnitude: config.minimum_output_magnitude,
            frame_interval: Duration::from_millis(u64::from(config.host_interval_ms.unsigned_abs())),
        }
    }

    /// Add a raw wheel delta to the accumulator.
    pub fn enqueue(&mut self, vertical: i16) {
        self.accumulator += f64::from(vertical);
    }

    /// Apply an abbreviated runtime update from the peripheral.
    ///
    /// A zero field means "leave this setting alone", not an error. Returns
    /// `true` when the tick period changed and the caller must restart its
    /// timer (abrupt phase reset, no carry-over of the partial interval).
    #[must_use]
    pub fn apply_update(&mut self, step_pixels: u8, interval_ms: u8) -> bool {
        if step_pixels > 0 {
            self.max_step_per_frame = f64::from(step_pixels);
        }
        if interval_ms > 0 {
            let interval = Duration::from_millis(u64::from(interval_ms));
            if interval != self.frame_interval {
                self.frame_interval = interval;
                return true;
            }
        }
        false
    }

    /// Release one tick's worth of output.
    ///
    /// Returns the released (unrounded) delta, or `None` when the
    /// accumulator is effectively empty. The released delta is damped,
    /// clamped to the per-frame cap, and raised to the minimum output
    /// magnitude when nonzero but too small to survive rounding. A delta of
    /// exactly zero after clamping has no sign to recover and is not
    /// floored; the tick emits nothing.
    pub fn drain(&mut self) -> Option<f64> {
        if self.accumulator.abs() <= IDLE_THRESHOLD {
            return None;
        }

        let mut delta = self.accumulator * self.damping;
        delta = delta.clamp(-self.max_step_per_frame, self.max_step_per_frame);

        if delta == 0.0 {
            return None;
        }
        if delta.abs() < self.minimum_output_magnitude {
            delta = self.minimum_output_magnitude.copysign(delta);
        }

        self.accumulator -= delta;
        Some(delta)
    }

    /// Whether the accumulator is below the release threshold.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.accumulator.abs() <= IDLE_THRESHOLD
    }

    /// Current tick period.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    #[cfg(test)]
    fn accumulator(&self) -> f64 {
        self.accumulator
    }
}
