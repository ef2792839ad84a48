//! Configuration integration tests
//!
//! Loading from disk, the example file, and recorder construction.

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;
    use telegram_api_monitor::config::{Config, Validate};
    use telegram_api_monitor::server;
    use telegram_api_monitor::{ApiMonitor, MonitorError};
    use tempfile::NamedTempFile;

    #[test]
    fn test_example_config_is_valid() {
        let content = include_str!("../../config/monitor.yaml.example");
        let config = Config::from_yaml(content).unwrap();
        assert!(config.server.validate().is_ok());
        assert_eq!(config.monitoring.max_history_hours, 24.0);
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 9300\nmonitoring:\n  max_history_hours: 2").unwrap();

        let config = server::load_config(Some(file.path())).await.unwrap();
        assert_eq!(config.server.port, 9300);
        assert_eq!(config.monitoring.max_history(), Duration::from_secs(7200));
    }

    #[tokio::test]
    async fn test_load_config_falls_back_when_missing() {
        let config = server::load_config(Some("/nonexistent/monitor.yaml"))
            .await
            .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        for yaml in [
            "server:\n  port: 0\n",
            "server:\n  workers: 0\n",
            "monitoring:\n  stats_lock_timeout_ms: 0\n",
            "monitoring:\n  dashboard_refresh_seconds: 0\n",
            "monitoring:\n  max_history_hours: .nan\n",
        ] {
            let result = Config::from_yaml(yaml);
            assert!(matches!(result, Err(MonitorError::Config(_))), "{}", yaml);
        }
    }

    #[test]
    fn test_monitor_from_config() {
        let config = Config::from_yaml(
            "monitoring:\n  max_history_hours: 0.25\n  stats_lock_timeout_ms: 50\n",
        )
        .unwrap();

        let monitor = ApiMonitor::from_config(config.monitoring());
        assert_eq!(monitor.max_history(), Duration::from_secs(900));
    }
}
