//! Recorder construction and record operations

use super::bounded::{BoundedPush, RECENT_ERRORS_CAPACITY};
use super::storage::RecorderStorage;
use crate::config::MonitoringConfig;
use crate::monitoring::taxonomy::ApiError;
use crate::monitoring::types::{CallRecord, ErrorRecord, LifetimeTotals};
use parking_lot::RwLock;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Default retention horizon for the rolling windows
pub(super) const DEFAULT_MAX_HISTORY: Duration = Duration::from_secs(24 * 3600);

/// Default bounded wait for statistics reads
pub(super) const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(1);

/// Thread-safe, time-windowed recorder of Bot API call outcomes and errors.
///
/// Construct one per process (or per bot) and share it as `Arc<ApiMonitor>`.
/// Record operations never fail and evict expired records lazily; queries
/// never mutate state.
#[derive(Debug)]
pub struct ApiMonitor {
    /// All recorder state behind one lock
    pub(super) storage: RwLock<RecorderStorage>,
    /// Retention horizon of the call and error windows
    pub(super) max_history: Duration,
    /// Bounded wait for statistics reads
    pub(super) lock_timeout: Duration,
}

impl Default for ApiMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl ApiMonitor {
    /// Create a recorder retaining records for `max_history`
    pub fn new(max_history: Duration) -> Self {
        info!(
            target: "telegram_monitoring",
            max_history_secs = max_history.as_secs_f64(),
            "Telegram API monitor initialized"
        );

        Self {
            storage: RwLock::new(RecorderStorage::default()),
            max_history,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Create a recorder from a validated monitoring configuration
    pub fn from_config(config: &MonitoringConfig) -> Self {
        Self::new(config.max_history()).with_lock_timeout(config.stats_lock_timeout())
    }

    /// Override the bounded wait used by statistics reads
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    /// Retention horizon of the rolling windows
    pub fn max_history(&self) -> Duration {
        self.max_history
    }

    /// Record the outcome of one API call
    pub fn record_api_call(
        &self,
        method_name: &str,
        succeeded: bool,
        latency: Duration,
        chat_id: Option<i64>,
        user_id: Option<i64>,
    ) {
        let mut storage = self.storage.write();
        let now = Instant::now();
        storage.evict_expired(now, self.max_history);

        storage.calls.push_back(CallRecord {
            recorded_at: now,
            timestamp: chrono::Utc::now(),
            method_name: method_name.to_string(),
            succeeded,
            latency,
            chat_id,
            user_id,
        });

        let tally = storage
            .method_tally
            .entry(method_name.to_string())
            .or_default();
        if succeeded {
            tally.success += 1;
        } else {
            tally.error += 1;
        }
    }

    /// Record one API error
    pub fn record_error(
        &self,
        api_error: &ApiError,
        method_name: &str,
        chat_id: Option<i64>,
        user_id: Option<i64>,
        retry_count: u32,
    ) {
        let bucket = api_error.bucket();

        {
            let mut storage = self.storage.write();
            let now = Instant::now();
            storage.evict_expired(now, self.max_history);

            let record = ErrorRecord {
                recorded_at: now,
                timestamp: chrono::Utc::now(),
                error_kind: api_error.kind.clone(),
                status_code: api_error.status_code,
                message: api_error.message.clone(),
                method_name: method_name.to_string(),
                chat_id,
                user_id,
                retry_count,
            };

            storage.counters.apply(bucket);
            *storage
                .errors_by_kind
                .entry(api_error.kind.tag().into_owned())
                .or_insert(0) += 1;
            storage
                .recent_errors
                .push_bounded(record.clone(), RECENT_ERRORS_CAPACITY);
            storage.errors.push_back(record);
        }

        error!(
            target: "telegram_monitoring",
            error_kind = %api_error.kind,
            method = method_name,
            status_code = ?api_error.status_code,
            chat_id = ?chat_id,
            user_id = ?user_id,
            retry_count,
            "Telegram API error: {}",
            api_error.message
        );
        debug!(target: "telegram_monitoring", ?bucket, "Error classified");
    }

    /// Lifetime counters, tallies and per-kind counts
    pub fn lifetime_totals(&self) -> LifetimeTotals {
        let storage = self.storage.read();
        LifetimeTotals {
            counters: storage.counters,
            methods: storage
                .method_tally
                .iter()
                .map(|(method, tally)| (method.clone(), *tally))
                .collect(),
            errors_by_kind: storage
                .errors_by_kind
                .iter()
                .map(|(kind, count)| (kind.clone(), *count))
                .collect(),
        }
    }

    /// Contents of the recent-errors ring, oldest first
    pub fn recent_errors(&self) -> Vec<ErrorRecord> {
        self.storage.read().recent_errors.iter().cloned().collect()
    }

    /// Number of records currently held in the call and error windows
    pub fn window_len(&self) -> (usize, usize) {
        let storage = self.storage.read();
        (storage.calls.len(), storage.errors.len())
    }
}
