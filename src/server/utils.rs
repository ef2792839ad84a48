//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::MonitorError;

impl HttpServer {
    /// Turn a bind failure into an actionable server error
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> MonitorError {
        let error_str = error.to_string();

        if error.kind() == std::io::ErrorKind::AddrInUse
            || error_str.contains("os error 48")
            || error_str.contains("os error 98")
        {
            MonitorError::server(format!(
                "Port {port} is already in use. Stop the process holding it \
                 (lsof -i:{port}) or start with --port {next} / MONITOR_PORT={next}",
                port = port,
                next = port.saturating_add(1),
            ))
        } else if error.kind() == std::io::ErrorKind::PermissionDenied
            || error_str.contains("os error 13")
        {
            MonitorError::server(format!(
                "Permission denied for port {}. Use a port >= 1024, e.g. --port 8080",
                port
            ))
        } else {
            MonitorError::server(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
