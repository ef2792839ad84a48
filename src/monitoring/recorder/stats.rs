//! Windowed statistics and health derivation

use super::bounded::HEALTH_RECENT_ERRORS;
use super::helpers::{calculate_percentile, round2, window_from_hours, window_start};
use super::monitor::ApiMonitor;
use super::storage::RecorderStorage;
use crate::monitoring::types::{
    CallRecord, CategoryCounts, ErrorRecord, HealthLevel, HealthReport, StatsReport,
};
use parking_lot::RwLockReadGuard;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::warn;

/// Window length of the health report and the exporters
pub(super) const ONE_HOUR: f64 = 1.0;

impl ApiMonitor {
    /// Take the read lock, giving up after the configured timeout
    pub(super) fn read_storage(&self) -> Option<RwLockReadGuard<'_, RecorderStorage>> {
        let guard = self.storage.try_read_for(self.lock_timeout);
        if guard.is_none() {
            warn!(
                target: "telegram_monitoring",
                timeout_ms = self.lock_timeout.as_millis() as u64,
                "Statistics lock not acquired in time, returning neutral report"
            );
        }
        guard
    }

    /// Error statistics over the last `hours`.
    ///
    /// Read-only. Degrades to [`StatsReport::neutral`] when the lock cannot be
    /// taken within the configured timeout.
    pub fn get_error_stats(&self, hours: f64) -> StatsReport {
        match self.read_storage() {
            Some(storage) => {
                summarize_window(&storage, Instant::now(), window_from_hours(hours), hours)
            }
            None => StatsReport::neutral(hours),
        }
    }

    /// Health classification over the last hour, with the latest errors
    pub fn get_health_status(&self) -> HealthReport {
        let stats = self.get_error_stats(ONE_HOUR);

        let recent_errors = self
            .read_storage()
            .map(|storage| {
                let skip = storage.recent_errors.len().saturating_sub(HEALTH_RECENT_ERRORS);
                storage.recent_errors.iter().skip(skip).cloned().collect()
            })
            .unwrap_or_default();

        HealthReport {
            status: HealthLevel::from_error_rate(stats.error_rate),
            error_rate: stats.error_rate,
            success_rate: stats.success_rate,
            total_calls: stats.total_calls,
            total_errors: stats.total_errors,
            last_check: chrono::Utc::now(),
            recent_errors,
        }
    }
}

/// Summarize the records of both windows that fall inside `window`
pub(super) fn summarize_window(
    storage: &RecorderStorage,
    now: Instant,
    window: Duration,
    period_hours: f64,
) -> StatsReport {
    let cutoff = window_start(now, window);
    let inside = |recorded_at: Instant| cutoff.is_none_or(|c| recorded_at >= c);

    summarize(
        storage.calls.iter().filter(|c| inside(c.recorded_at)),
        storage.errors.iter().filter(|e| inside(e.recorded_at)),
        period_hours,
    )
}

/// Derive a report from already-filtered records
fn summarize<'a, C, E>(calls: C, errors: E, period_hours: f64) -> StatsReport
where
    C: Iterator<Item = &'a CallRecord>,
    E: Iterator<Item = &'a ErrorRecord>,
{
    let mut latencies: Vec<f64> = calls
        .map(|call| call.latency.as_secs_f64() * 1000.0)
        .filter(|ms| ms.is_finite())
        .collect();
    latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut errors_by_type = BTreeMap::new();
    let mut errors_by_method = BTreeMap::new();
    let mut errors_by_code = BTreeMap::new();
    let mut categories = CategoryCounts::default();
    let mut total_errors = 0u64;

    for error in errors {
        total_errors += 1;
        *errors_by_type
            .entry(error.error_kind.tag().into_owned())
            .or_insert(0) += 1;
        *errors_by_method
            .entry(error.method_name.clone())
            .or_insert(0) += 1;
        if let Some(code) = error.status_code.filter(|code| *code != 0) {
            *errors_by_code.entry(code).or_insert(0) += 1;
        }
        categories.observe(error);
    }

    let total_calls = latencies.len() as u64;
    let (success_rate, error_rate) = if total_calls > 0 {
        let calls = total_calls as f64;
        let errors = total_errors as f64;
        ((calls - errors) / calls * 100.0, errors / calls * 100.0)
    } else {
        (100.0, 0.0)
    };

    let avg_latency_ms = if latencies.is_empty() {
        0.0
    } else {
        latencies.iter().sum::<f64>() / latencies.len() as f64
    };

    StatsReport {
        period_hours,
        total_calls,
        total_errors,
        success_rate: round2(success_rate),
        error_rate: round2(error_rate),
        errors_by_type,
        errors_by_method,
        errors_by_code,
        categories,
        avg_latency_ms: round2(avg_latency_ms),
        p95_latency_ms: round2(calculate_percentile(&latencies, 0.95)),
    }
}
