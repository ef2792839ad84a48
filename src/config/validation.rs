//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use tracing::{debug, warn};

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating server configuration");

        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.host.trim().is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.workers == Some(0) {
            return Err("Workers must be greater than 0".to_string());
        }

        self.cors.validate()
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        for method in &self.allowed_methods {
            if method.parse::<actix_web::http::Method>().is_err() {
                return Err(format!("Invalid CORS method: {}", method));
            }
        }

        if self.allows_all_origins() {
            debug!("CORS allows all origins");
        }

        Ok(())
    }
}

impl Validate for MonitoringConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating monitoring configuration");

        if !self.max_history_hours.is_finite() || self.max_history_hours <= 0.0 {
            return Err(format!(
                "max_history_hours must be a positive number, got {}",
                self.max_history_hours
            ));
        }

        if self.stats_lock_timeout_ms == 0 {
            return Err("stats_lock_timeout_ms must be greater than 0".to_string());
        }

        if self.stats_lock_timeout_ms > 10_000 {
            warn!(
                timeout_ms = self.stats_lock_timeout_ms,
                "Long statistics lock timeout may stall the metrics endpoints"
            );
        }

        if self.dashboard_refresh_seconds == 0 {
            return Err("dashboard_refresh_seconds must be greater than 0".to_string());
        }

        Ok(())
    }
}
