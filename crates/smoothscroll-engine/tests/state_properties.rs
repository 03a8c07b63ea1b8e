//! Property tests over the drain math: whatever the input burst pattern and
//! (sanitized) tuning, every released step respects the cap and the floor.

use proptest::prelude::*;
use smoothscroll_config::SmoothingConfig;
use smoothscroll_engine::EngineState;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(300))]

    /// Releases are always cap-bounded and (being nonzero) floor-raised.
    #[test]
    fn prop_releases_bounded(
        deltas in proptest::collection::vec(any::<i16>(), 1..50),
        damping in 0.01..=1.0f64,
        cap in 1.0..64.0f64,
        min_out in 0.1..2.0f64,
    ) {
        let config = SmoothingConfig {
            host_step_pixels: 1,
            host_interval_ms: 5,
            damping,
            max_step_per_frame: cap,
            minimum_output_magnitude: min_out,
        };
        let mut state = EngineState::from_config(&config);

        for delta in deltas {
            state.enqueue(delta);
            for _ in 0..8 {
                if let Some(released) = state.drain() {
                    prop_assert!(released.is_finite());
                    prop_assert!(released.abs() <= cap + 1e-9);
                    prop_assert!(released.abs() >= min_out - 1e-9);
                }
            }
        }
    }

    /// An interleaved reconfiguration never breaks the (new) cap bound.
    #[test]
    fn prop_cap_override_respected(
        burst in 1..i16::MAX,
        new_cap in 1..=255u8,
    ) {
        let mut state = EngineState::from_config(&SmoothingConfig {
            host_step_pixels: 1,
            host_interval_ms: 5,
            damping: 1.0,
            max_step_per_frame: 1000.0,
            minimum_output_magnitude: 0.1,
        });

        let _ = state.apply_update(new_cap, 0);
        state.enqueue(burst);
        if let Some(released) = state.drain() {
            prop_assert!(released.abs() <= f64::from(new_cap) + 1e-9);
        }
    }
}
