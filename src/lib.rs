//! # telegram-api-monitor
//!
//! In-process telemetry for Telegram Bot API calls.
//!
//! ## Features
//!
//! - **Rolling windows**: call outcomes and errors kept for a configurable horizon
//! - **Error taxonomy**: a closed set of failure kinds mapped into fixed categories
//! - **Statistics**: success and error rates, breakdowns and latency over any window
//! - **Health**: four-level status over the last hour
//! - **Exporters**: Prometheus text, JSON statistics and flat Zabbix keys
//! - **HTTP surface**: actix-web routes and an auto-refreshing dashboard
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use telegram_api_monitor::{ApiError, ApiMonitor, CallContext, monitor_call};
//!
//! # async fn send() -> Result<(), ApiError> { Ok(()) }
//! #[tokio::main]
//! async fn main() {
//!     let monitor = Arc::new(ApiMonitor::default());
//!
//!     let _ = monitor_call(&monitor, CallContext::new("sendMessage").chat(42), send()).await;
//!
//!     let stats = monitor.get_error_stats(1.0);
//!     println!("error rate: {}%", stats.error_rate);
//!     println!("{}", monitor.export_prometheus());
//! }
//! ```
//!
//! ## Server Mode
//!
//! ```rust,no_run
//! use telegram_api_monitor::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/monitor.yaml").await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod monitoring;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use monitoring::{
    ApiError, ApiErrorKind, ApiFailure, ApiMonitor, CallContext, ExportFormat, FlatValue,
    HealthLevel, HealthReport, StatsReport, monitor_blocking, monitor_call,
};
pub use utils::error::{MonitorError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Version and provenance stamped in by `build.rs`, logged at server startup
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the Unix epoch
    pub build_time: &'static str,
    /// Short commit hash, `unknown` outside a git checkout
    pub git_hash: &'static str,
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
    }
}
