//! Telegram Bot API telemetry
//!
//! This module provides the error taxonomy, the time-windowed recorder, and
//! the instrumentation helpers that feed it.

pub mod instrument;
pub mod recorder;
pub mod taxonomy;
pub mod types;

// Re-export public types
pub use instrument::{ApiFailure, CallContext, monitor_blocking, monitor_call};
pub use recorder::{ApiMonitor, HEALTH_RECENT_ERRORS, RECENT_ERRORS_CAPACITY};
pub use taxonomy::{ApiError, ApiErrorKind, ErrorBucket};
pub use types::{
    CallRecord, CategoryCounts, ErrorRecord, ExportFormat, FlatValue, HealthLevel, HealthReport,
    LifetimeTotals, MethodTally, StatsReport,
};
