//! Configuration management for the monitor
//!
//! This module handles loading, validation, and environment overrides of the
//! server and monitoring configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct for the monitor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Recorder configuration
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MonitorError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        Self::default().with_env_overrides()
    }

    /// Apply `MONITOR_*` environment variables and re-validate
    pub fn with_env_overrides(self) -> Result<Self> {
        // A missing .env file is the common case
        let _ = dotenvy::dotenv();

        let config =
            self.with_overrides(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `MONITOR_*` overrides using the given variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("MONITOR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_var(&lookup, "MONITOR_PORT")? {
            self.server.port = port;
        }
        if let Some(workers) = parse_var(&lookup, "MONITOR_WORKERS")? {
            self.server.workers = Some(workers);
        }
        if let Some(hours) = parse_var(&lookup, "MONITOR_MAX_HISTORY_HOURS")? {
            self.monitoring.max_history_hours = hours;
        }
        if let Some(timeout) = parse_var(&lookup, "MONITOR_STATS_LOCK_TIMEOUT_MS")? {
            self.monitoring.stats_lock_timeout_ms = timeout;
        }
        if let Some(refresh) = parse_var(&lookup, "MONITOR_DASHBOARD_REFRESH_SECONDS")? {
            self.monitoring.dashboard_refresh_seconds = refresh;
        }
        Ok(self)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get monitoring configuration
    pub fn monitoring(&self) -> &MonitoringConfig {
        &self.monitoring
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| MonitorError::Config(format!("Server config error: {}", e)))?;

        self.monitoring
            .validate()
            .map_err(|e| MonitorError::Config(format!("Monitoring config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| MonitorError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(None),
    }
}
