//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for configuration loading with fallback.

use crate::config::Config;
use crate::monitoring::ApiMonitor;
use crate::server::server::HttpServer;
use crate::utils::error::{MonitorError, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/monitor.yaml";

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    monitor: Option<Arc<ApiMonitor>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Serve an existing recorder instead of creating one
    pub fn with_monitor(mut self, monitor: Arc<ApiMonitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| MonitorError::config("Configuration is required"))?;

        match self.monitor {
            Some(monitor) => HttpServer::with_monitor(&config, monitor),
            None => HttpServer::new(&config),
        }
    }
}

/// Load configuration from `path` with environment overrides, falling back to
/// the environment alone
pub async fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<Config> {
    let path = path
        .as_ref()
        .map(|p| p.as_ref().to_path_buf())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());

    match Config::from_file(&path).await {
        Ok(config) => {
            info!("Configuration file loaded: {}", path.display());
            config.with_env_overrides()
        }
        Err(e) => {
            warn!(
                "Configuration file loading failed, using environment and defaults: {}",
                e
            );
            Config::from_env()
        }
    }
}

/// Run the server for `config`
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting Telegram API monitor");

    let server = ServerBuilder::new().with_config(config).build()?;
    info!("Server starting at: http://{}", server.config().address());
    info!("Endpoints:");
    info!("   GET  /metrics        - Prometheus exposition");
    info!("   GET  /metrics/json   - JSON statistics (?hours=N)");
    info!("   GET  /metrics/zabbix - Flat keys");
    info!("   GET  /health         - Health status");
    info!("   GET  /dashboard      - HTML dashboard");

    server.start().await
}
