//! Monitoring configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// How long call and error records stay in the rolling windows
    #[serde(default = "default_max_history_hours")]
    pub max_history_hours: f64,
    /// Bounded wait for statistics reads before degrading to a neutral report
    #[serde(default = "default_stats_lock_timeout_ms")]
    pub stats_lock_timeout_ms: u64,
    /// Dashboard auto-refresh interval
    #[serde(default = "default_dashboard_refresh_seconds")]
    pub dashboard_refresh_seconds: u32,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            max_history_hours: default_max_history_hours(),
            stats_lock_timeout_ms: default_stats_lock_timeout_ms(),
            dashboard_refresh_seconds: default_dashboard_refresh_seconds(),
        }
    }
}

impl MonitoringConfig {
    /// Retention horizon as a duration.
    ///
    /// Only meaningful on a validated config; out-of-range values saturate.
    pub fn max_history(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_history_hours * 3600.0).unwrap_or(Duration::MAX)
    }

    /// Statistics lock timeout as a duration
    pub fn stats_lock_timeout(&self) -> Duration {
        Duration::from_millis(self.stats_lock_timeout_ms)
    }
}
