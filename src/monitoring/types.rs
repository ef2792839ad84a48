//! Records, reports and export types

use super::taxonomy::{ApiErrorKind, ErrorBucket, is_client_error, is_server_error, mentions_rate_limit};
use crate::utils::error::MonitorError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// One API call outcome
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// Monotonic instant used for window arithmetic
    pub(crate) recorded_at: Instant,
    /// Wall-clock time of the call
    pub timestamp: DateTime<Utc>,
    pub method_name: String,
    pub succeeded: bool,
    pub latency: Duration,
    pub chat_id: Option<i64>,
    pub user_id: Option<i64>,
}

/// One recorded API error
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    #[serde(skip)]
    pub(crate) recorded_at: Instant,
    pub timestamp: DateTime<Utc>,
    pub error_kind: ApiErrorKind,
    pub status_code: Option<u16>,
    pub message: String,
    pub method_name: String,
    pub chat_id: Option<i64>,
    pub user_id: Option<i64>,
    pub retry_count: u32,
}

/// Lifetime success/error tally of one API method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MethodTally {
    pub success: u64,
    pub error: u64,
}

/// The five fixed error categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    #[serde(rename = "http_4xx_count")]
    pub http_4xx: u64,
    #[serde(rename = "http_5xx_count")]
    pub http_5xx: u64,
    #[serde(rename = "network_errors")]
    pub network: u64,
    #[serde(rename = "timeout_errors")]
    pub timeout: u64,
    #[serde(rename = "rate_limit_errors")]
    pub rate_limit: u64,
}

impl CategoryCounts {
    /// Apply one ingestion-time bucket. At most one rule fires per error.
    pub(crate) fn apply(&mut self, bucket: ErrorBucket) {
        match bucket {
            ErrorBucket::ClientError | ErrorBucket::Forbidden => self.http_4xx += 1,
            ErrorBucket::Network { server_error } => {
                self.network += 1;
                if server_error {
                    self.http_5xx += 1;
                }
            }
            ErrorBucket::Timeout => self.timeout += 1,
            ErrorBucket::RateLimited => {
                self.rate_limit += 1;
                self.http_4xx += 1;
            }
            ErrorBucket::Unclassified => {}
        }
    }

    /// Count one windowed error with independent predicates. An error may land
    /// in several categories (a 502 NetworkError is both network and 5xx).
    pub(crate) fn observe(&mut self, error: &ErrorRecord) {
        if is_client_error(error.status_code) {
            self.http_4xx += 1;
        }
        if is_server_error(error.status_code) {
            self.http_5xx += 1;
        }
        if error.error_kind == ApiErrorKind::NetworkError {
            self.network += 1;
        }
        if error.error_kind == ApiErrorKind::TimedOut {
            self.timeout += 1;
        }
        if mentions_rate_limit(&error.message) {
            self.rate_limit += 1;
        }
    }
}

/// Windowed error statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub period_hours: f64,
    pub total_calls: u64,
    pub total_errors: u64,
    pub success_rate: f64,
    pub error_rate: f64,
    pub errors_by_type: BTreeMap<String, u64>,
    pub errors_by_method: BTreeMap<String, u64>,
    pub errors_by_code: BTreeMap<u16, u64>,
    #[serde(flatten)]
    pub categories: CategoryCounts,
    pub avg_latency_ms: f64,
    pub p95_latency_ms: f64,
}

impl StatsReport {
    /// Report returned when no data could be read: nothing failed, nothing ran
    pub fn neutral(period_hours: f64) -> Self {
        Self {
            period_hours,
            total_calls: 0,
            total_errors: 0,
            success_rate: 100.0,
            error_rate: 0.0,
            errors_by_type: BTreeMap::new(),
            errors_by_method: BTreeMap::new(),
            errors_by_code: BTreeMap::new(),
            categories: CategoryCounts::default(),
            avg_latency_ms: 0.0,
            p95_latency_ms: 0.0,
        }
    }
}

/// Four-level health classification over the last hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthLevel {
    Healthy,
    Degraded,
    Warning,
    Critical,
}

impl HealthLevel {
    /// Thresholds are evaluated high to low
    pub fn from_error_rate(error_rate: f64) -> Self {
        if error_rate > 50.0 {
            HealthLevel::Critical
        } else if error_rate > 20.0 {
            HealthLevel::Warning
        } else if error_rate > 5.0 {
            HealthLevel::Degraded
        } else {
            HealthLevel::Healthy
        }
    }

    /// Whether the health endpoint should answer 503
    pub fn is_unavailable(&self) -> bool {
        matches!(self, HealthLevel::Critical | HealthLevel::Warning)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLevel::Healthy => "HEALTHY",
            HealthLevel::Degraded => "DEGRADED",
            HealthLevel::Warning => "WARNING",
            HealthLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health summary with the latest errors
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthLevel,
    pub error_rate: f64,
    pub success_rate: f64,
    pub total_calls: u64,
    pub total_errors: u64,
    pub last_check: DateTime<Utc>,
    /// Oldest first
    pub recent_errors: Vec<ErrorRecord>,
}

/// Value in the flat key export
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Count(u64),
    Rate(f64),
}

/// Lifetime totals, never pruned by the time window
#[derive(Debug, Clone, Default, Serialize)]
pub struct LifetimeTotals {
    pub counters: CategoryCounts,
    pub methods: BTreeMap<String, MethodTally>,
    pub errors_by_kind: BTreeMap<String, u64>,
}

/// File export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Statistics document over the last 24 hours
    Json,
    /// Prometheus text exposition
    Prometheus,
    /// Flat dotted keys for Zabbix-style agents
    Zabbix,
}

impl FromStr for ExportFormat {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "prometheus" | "prom" => Ok(ExportFormat::Prometheus),
            "zabbix" | "flat" => Ok(ExportFormat::Zabbix),
            other => Err(MonitorError::validation(format!(
                "Unknown export format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Json => "json",
            ExportFormat::Prometheus => "prometheus",
            ExportFormat::Zabbix => "zabbix",
        })
    }
}
