//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::config::Config;
use crate::monitoring::ApiMonitor;
use crate::server::routes::dashboard;
use crate::utils::error::Result;
use minijinja::Environment;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so every worker shares one recorder and one
/// template environment.
#[derive(Clone)]
pub struct AppState {
    /// Monitor configuration (shared read-only)
    pub config: Arc<Config>,
    /// The recorder fed by the bot and read by every route
    pub monitor: Arc<ApiMonitor>,
    /// Compiled dashboard templates
    pub templates: Arc<Environment<'static>>,
}

impl AppState {
    /// Create a new AppState around an existing recorder
    pub fn new(config: Config, monitor: Arc<ApiMonitor>) -> Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            monitor,
            templates: Arc::new(dashboard::environment()?),
        })
    }

    /// Create a new AppState with a recorder built from the configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let monitor = Arc::new(ApiMonitor::from_config(config.monitoring()));
        Self::new(config, monitor)
    }

    /// Get monitor configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
