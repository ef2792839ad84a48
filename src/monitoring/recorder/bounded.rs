//! Bounded collection utilities for the recent-errors ring

use std::collections::VecDeque;

/// Capacity of the recent-errors ring
pub const RECENT_ERRORS_CAPACITY: usize = 100;

/// Number of recent errors carried by the health report
pub const HEALTH_RECENT_ERRORS: usize = 5;

/// Helper trait for bounded VecDeque operations
pub(super) trait BoundedPush<T> {
    fn push_bounded(&mut self, value: T, max_size: usize);
}

impl<T> BoundedPush<T> for VecDeque<T> {
    /// Push a value while maintaining a maximum size (O(1) amortized)
    #[inline]
    fn push_bounded(&mut self, value: T, max_size: usize) {
        if self.len() >= max_size {
            self.pop_front();
        }
        self.push_back(value);
    }
}
