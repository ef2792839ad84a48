//! Error handling for the monitor
//!
//! This module defines the crate error type, its helpers and its HTTP mapping.

mod helpers;
mod response;
mod types;


pub use response::{ErrorDetail, ErrorResponse};
pub use types::{MonitorError, Result};
