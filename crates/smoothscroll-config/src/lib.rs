//! Smoothing configuration for the scroll engine.
//!
//! Holds the five host-side smoothing parameters and the sanitizing clamp
//! applied on load and before any push to the peripheral. Loading is
//! deliberately forgiving: a missing or unparseable config file falls back to
//! sanitized defaults and the daemon keeps running.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default peripheral-side nominal step size in pixels.
pub const DEFAULT_STEP_PIXELS: i32 = 3;
/// Default engine tick period in milliseconds.
pub const DEFAULT_INTERVAL_MS: i32 = 5;
/// Default fraction of the accumulated delta released per tick.
pub const DEFAULT_DAMPING: f64 = 0.28;
/// Default hard per-tick output cap in pixels.
pub const DEFAULT_MAX_STEP_PER_FRAME: f64 = 6.0;
/// Default smallest nonzero magnitude ever emitted.
pub const DEFAULT_MINIMUM_OUTPUT_MAGNITUDE: f64 = 0.4;

/// Errors from the fallible configuration loader.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The five smoothing parameters, as persisted on disk.
///
/// Field values straight from deserialization are untrusted; call
/// [`SmoothingConfig::sanitize`] before using them. Every loader in this
/// crate already returns sanitized values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmoothingConfig {
    /// Peripheral-side nominal step size, pixels per detent. Also the floor
    /// for `max_step_per_frame`.
    pub host_step_pixels: i32,
    /// Engine tick period in milliseconds.
    pub host_interval_ms: i32,
    /// Fraction of the accumulated delta released per tick, `[0.01, 1.0]`.
    pub damping: f64,
    /// Hard per-tick output cap in pixels.
    pub max_step_per_frame: f64,
    /// Smallest nonzero magnitude ever emitted.
    pub minimum_output_magnitude: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            host_step_pixels: DEFAULT_STEP_PIXELS,
            host_interval_ms: DEFAULT_INTERVAL_MS,
            damping: DEFAULT_DAMPING,
            max_step_per_frame: DEFAULT_MAX_STEP_PER_FRAME,
            minimum_output_magnitude: DEFAULT_MINIMUM_OUTPUT_MAGNITUDE,
        }
    }
}

impl SmoothingConfig {
    /// Clamp every field into its valid range.
    ///
    /// Pure, total, and idempotent: any input (negative, zero, non-finite)
    /// maps to a config satisfying
    /// `host_step_pixels >= 1 && host_interval_ms >= 1 &&
    /// 0.01 <= damping <= 1.0 &&
    /// max_step_per_frame >= max(1, host_step_pixels) &&
    /// minimum_output_magnitude >= 0.1`.
    ///
    /// Non-finite floats clamp to their nearest bound; `NaN` takes the lower
    /// bound. This is a clamp, not a validator: there is no error outcome.
    #[must_use]
    pub fn sanitize(mut self) -> Self {
        self.host_step_pixels = self.host_step_pixels.max(1);
        self.host_interval_ms = self.host_interval_ms.max(1);
        self.damping = clamp_total(self.damping, 0.01, 1.0);
        self.max_step_per_frame = floor_total(
            self.max_step_per_frame,
            f64::from(self.host_step_pixels).max(1.0),
        );
        self.minimum_output_magnitude = floor_total(self.minimum_output_magnitude, 0.1);
        self
    }

    /// Step-size field of the abbreviated device frame, clamped to `0..=255`.
    #[must_use]
    pub fn device_step_pixels(&self) -> u8 {
        clamp_byte(self.host_step_pixels)
    }

    /// Interval field of the abbreviated device frame, clamped to `0..=255`.
    #[must_use]
    pub fn device_interval_ms(&self) -> u8 {
        clamp_byte(self.host_interval_ms)
    }

    /// Load a config file, returning which failure occurred if it cannot be
    /// read or parsed. The returned config is already sanitized.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Parse`] when it is not a valid config record.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "loaded smoothing config");
        Ok(config.sanitize())
    }

    /// Load a config file, substituting sanitized defaults on any failure.
    ///
    /// A missing file is the common first-run case and logs at debug; a file
    /// that exists but does not parse logs a warning so a broken edit is
    /// visible without stopping the daemon.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(ConfigError::Io { path, source }) => {
                debug!(path = %path.display(), error = %source, "no config file, using defaults");
                Self::default().sanitize()
            }
            Err(err @ ConfigError::Parse { .. }) => {
                warn!(error = %err, "config file unreadable, using defaults");
                Self::default().sanitize()
            }
        }
    }
}

/// Default location of the persisted config record.
///
/// `%LOCALAPPDATA%\smooth-scrolld\config.json` on Windows,
/// `$XDG_CONFIG_HOME/smooth-scrolld/config.json` (falling back to
/// `$HOME/.config`) elsewhere. `None` when the environment gives no base
/// directory to anchor to.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        PathBuf::from(std::env::var_os("LOCALAPPDATA")?)
    } else if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else {
        PathBuf::from(std::env::var_os("HOME")?).join(".config")
    };
    Some(base.join("smooth-scrolld").join("config.json"))
}

/// Clamp with a defined answer for non-finite inputs: `NaN` maps to `lo`,
/// infinities to their nearest bound.
fn clamp_total(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() { lo } else { value.clamp(lo, hi) }
}

/// One-sided clamp: `NaN` maps to the floor.
fn floor_total(value: f64, floor: f64) -> f64 {
    if value.is_nan() { floor } else { value.max(floor) }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clamped to 0..=255 first"
)]
fn clamp_byte(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_already_sanitized() {
        let config = SmoothingConfig::default();
        assert_eq!(config, config.sanitize());
    }

    #[test]
    fn test_sanitize_floors_integers() {
        let config = SmoothingConfig {
            host_step_pixels: -4,
            host_interval_ms: 0,
            ..SmoothingConfig::default()
        }
        .sanitize();
        assert_eq!(config.host_step_pixels, 1);
        assert_eq!(config.host_interval_ms, 1);
    }

    #[test]
    fn test_sanitize_cap_floor_tracks_step() {
        let config = SmoothingConfig {
            host_step_pixels: 12,
            max_step_per_frame: 2.0,
            ..SmoothingConfig::default()
        }
        .sanitize();
        assert!((config.max_step_per_frame - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sanitize_non_finite_floats() {
        let config = SmoothingConfig {
            damping: f64::NAN,
            max_step_per_frame: f64::NEG_INFINITY,
            minimum_output_magnitude: f64::INFINITY,
            ..SmoothingConfig::default()
        }
        .sanitize();
        assert!((config.damping - 0.01).abs() < f64::EPSILON);
        assert!((config.max_step_per_frame - 3.0).abs() < f64::EPSILON);
        assert!(config.minimum_output_magnitude.is_infinite());

        let config = SmoothingConfig {
            damping: f64::INFINITY,
            ..SmoothingConfig::default()
        }
        .sanitize();
        assert!((config.damping - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_device_projection_clamps_to_byte() {
        let config = SmoothingConfig {
            host_step_pixels: 1000,
            host_interval_ms: 7,
            ..SmoothingConfig::default()
        };
        assert_eq!(config.device_step_pixels(), 255);
        assert_eq!(config.device_interval_ms(), 7);
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let config: SmoothingConfig =
            serde_json::from_str(r#"{"damping": 0.5}"#).expect("partial record parses");
        assert!((config.damping - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.host_step_pixels, DEFAULT_STEP_PIXELS);
        assert_eq!(config.host_interval_ms, DEFAULT_INTERVAL_MS);
    }
}
