//! Custom test assertions
//!
//! Provides domain-specific assertions for reports.

use telegram_api_monitor::StatsReport;

/// Assertions for StatsReport
pub trait StatsAssertions {
    /// Assert the report holds no traffic at all
    fn assert_neutral(&self);

    /// Assert the rates agree with the totals
    fn assert_consistent_rates(&self);
}

impl StatsAssertions for StatsReport {
    fn assert_neutral(&self) {
        assert_eq!(self.total_calls, 0, "Expected no calls");
        assert_eq!(self.total_errors, 0, "Expected no errors");
        assert_eq!(self.success_rate, 100.0);
        assert_eq!(self.error_rate, 0.0);
    }

    fn assert_consistent_rates(&self) {
        if self.total_calls == 0 {
            return;
        }
        let expected = self.total_errors as f64 / self.total_calls as f64 * 100.0;
        assert!(
            (self.error_rate - expected).abs() <= 0.006,
            "error_rate {} does not match {} errors in {} calls",
            self.error_rate,
            self.total_errors,
            self.total_calls
        );
        assert!(
            (self.success_rate + self.error_rate - 100.0).abs() <= 0.011,
            "rates {} + {} do not add up to 100",
            self.success_rate,
            self.error_rate
        );
    }
}

/// Assert two values are approximately equal (for floats)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-6_f64)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < $epsilon,
            "assertion failed: {} is not approximately {}",
            left,
            right
        );
    }};
}
