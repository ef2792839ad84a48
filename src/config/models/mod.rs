//! Configuration data models
//!
//! This module defines all configuration structures used by the monitor.

pub mod monitoring;
pub mod server;

// Re-export all configuration types
pub use monitoring::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default retention horizon for the rolling windows, in hours
pub fn default_max_history_hours() -> f64 {
    24.0
}

/// Default bounded wait for statistics reads, in milliseconds
pub fn default_stats_lock_timeout_ms() -> u64 {
    1000
}

/// Default dashboard auto-refresh interval in seconds
pub fn default_dashboard_refresh_seconds() -> u32 {
    30
}

pub fn default_true() -> bool {
    true
}
