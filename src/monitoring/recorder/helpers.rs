//! Helper functions for statistics calculations

use std::time::{Duration, Instant};

/// Calculate percentile from sorted values
pub(super) fn calculate_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    if percentile >= 1.0 {
        return sorted_values.last().copied().unwrap_or(0.0);
    }

    let index = percentile * (sorted_values.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = (index.ceil() as usize).min(sorted_values.len() - 1);

    if lower == upper || lower >= sorted_values.len() {
        sorted_values.get(lower).copied().unwrap_or(0.0)
    } else {
        let weight = index - lower as f64;
        let lower_val = sorted_values.get(lower).copied().unwrap_or(0.0);
        let upper_val = sorted_values.get(upper).copied().unwrap_or(0.0);
        lower_val * (1.0 - weight) + upper_val * weight
    }
}

/// Round to two decimal places
#[inline]
pub(super) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a window length in hours to a duration.
///
/// NaN or non-positive input yields an empty window; oversized input,
/// including positive infinity, saturates.
pub(super) fn window_from_hours(hours: f64) -> Duration {
    if hours.is_nan() || hours <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(hours * 3600.0).unwrap_or(Duration::MAX)
}

/// Oldest instant still inside a window ending at `now`.
///
/// `None` when the window reaches past the earliest representable instant,
/// in which case every record is inside it.
#[inline]
pub(super) fn window_start(now: Instant, window: Duration) -> Option<Instant> {
    now.checked_sub(window)
}
