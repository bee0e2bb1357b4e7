//! Elapsed time and ETA estimation.
//!
//! The ETA is a plain linear extrapolation of the average time per frame
//! observed so far. It is noisy for the first few frames and is not smoothed.

use chrono::TimeDelta;
use std::time::Instant;

/// Progress numbers derived from a frame count and the encode start time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub elapsed: TimeDelta,
    /// Estimated time remaining. Negative when `current` exceeds `total`.
    pub eta: TimeDelta,
    /// Completion as a fraction (1.0 == done).
    pub percent: f64,
}

/// Fraction of `total` reached by `current`, or 0 when `total` is 0.
#[must_use]
pub fn completion_fraction(current: u64, total: u64) -> f64 {
    if total > 0 {
        current as f64 / total as f64
    } else {
        0.0
    }
}

/// Computes elapsed time, ETA and completion between `start` and `now`.
#[must_use]
pub fn estimate(current: u64, total: u64, start: Instant, now: Instant) -> Estimate {
    let elapsed = TimeDelta::from_std(now.saturating_duration_since(start))
        .unwrap_or(TimeDelta::MAX);
    estimate_from_elapsed(current, total, elapsed)
}

/// Same as [`estimate`] for an already measured elapsed time.
#[must_use]
pub fn estimate_from_elapsed(current: u64, total: u64, elapsed: TimeDelta) -> Estimate {
    let eta = if current > 0 {
        let per_frame_ms = elapsed.num_milliseconds() as f64 / current as f64;
        let remaining_frames = total as f64 - current as f64;
        let eta_ms = (per_frame_ms * remaining_frames).round() as i64;
        TimeDelta::try_milliseconds(eta_ms).unwrap_or(if eta_ms < 0 {
            TimeDelta::MIN
        } else {
            TimeDelta::MAX
        })
    } else {
        TimeDelta::zero()
    };

    Estimate {
        elapsed,
        eta,
        percent: completion_fraction(current, total),
    }
}
