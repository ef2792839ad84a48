//! Recorder state guarded by the monitor lock

use crate::monitoring::types::{CallRecord, CategoryCounts, ErrorRecord, MethodTally};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use super::helpers::window_start;

/// Consolidated recorder storage - single lock for all state
#[derive(Debug, Default)]
pub(super) struct RecorderStorage {
    /// Call outcomes, oldest first, bounded by the retention horizon
    pub(super) calls: VecDeque<CallRecord>,
    /// Errors, oldest first, bounded by the retention horizon
    pub(super) errors: VecDeque<ErrorRecord>,
    /// Lifetime per-method tallies
    pub(super) method_tally: HashMap<String, MethodTally>,
    /// Lifetime fixed-category counters
    pub(super) counters: CategoryCounts,
    /// Lifetime counts per taxonomy tag
    pub(super) errors_by_kind: HashMap<String, u64>,
    /// Most recent errors regardless of the horizon
    pub(super) recent_errors: VecDeque<ErrorRecord>,
}

impl RecorderStorage {
    /// Drop window records older than `horizon`. Both windows are
    /// insertion-ordered, so this only touches evicted entries.
    pub(super) fn evict_expired(&mut self, now: Instant, horizon: Duration) -> usize {
        let Some(cutoff) = window_start(now, horizon) else {
            return 0;
        };

        let mut evicted = 0;
        while self
            .calls
            .front()
            .is_some_and(|call| call.recorded_at < cutoff)
        {
            self.calls.pop_front();
            evicted += 1;
        }
        while self
            .errors
            .front()
            .is_some_and(|error| error.recorded_at < cutoff)
        {
            self.errors.pop_front();
            evicted += 1;
        }
        evicted
    }
}
