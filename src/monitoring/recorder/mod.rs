//! Time-windowed API telemetry recorder
//!
//! [`ApiMonitor`] ingests call outcomes and errors, keeps them in rolling
//! windows, and derives statistics, health and exports on demand.

mod bounded;
mod export;
mod helpers;
mod monitor;
mod stats;
mod storage;


pub use bounded::{HEALTH_RECENT_ERRORS, RECENT_ERRORS_CAPACITY};
pub use monitor::ApiMonitor;
