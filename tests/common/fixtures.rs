//! Test fixtures and data factories
//!
//! All factories create real values, not mocks.

use std::time::Duration;
use telegram_api_monitor::{ApiError, ApiErrorKind, ApiMonitor};

/// Factory for the error shapes the Bot API actually returns
pub struct ErrorFactory;

impl ErrorFactory {
    pub fn chat_not_found() -> ApiError {
        ApiError::from_status(400, "Bad Request: chat not found")
    }

    pub fn bot_blocked() -> ApiError {
        ApiError::from_status(403, "Forbidden: bot was blocked by the user")
    }

    pub fn bad_gateway() -> ApiError {
        ApiError::from_status(502, "Bad Gateway")
    }

    pub fn internal_server_error() -> ApiError {
        ApiError::network("Internal Server Error").with_status(500)
    }

    pub fn timed_out() -> ApiError {
        ApiError::timed_out("Timed out")
    }

    /// Flood control reported through the bad-request path
    pub fn flood_wait() -> ApiError {
        ApiError::bad_request("Too Many Requests: retry after 30").with_status(429)
    }

    pub fn conflict() -> ApiError {
        ApiError::new(
            ApiErrorKind::Telegram,
            "Conflict: terminated by other getUpdates request",
        )
        .with_status(409)
    }
}

/// Records batches of calls for one method
pub struct Traffic<'a> {
    monitor: &'a ApiMonitor,
    method: String,
    chat_id: Option<i64>,
    latency: Duration,
}

impl<'a> Traffic<'a> {
    pub fn new(monitor: &'a ApiMonitor, method: &str) -> Self {
        Self {
            monitor,
            method: method.to_string(),
            chat_id: None,
            latency: Duration::from_millis(50),
        }
    }

    pub fn chat(mut self, chat_id: i64) -> Self {
        self.chat_id = Some(chat_id);
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Record `count` successful calls
    pub fn succeed(&self, count: usize) -> &Self {
        for _ in 0..count {
            self.monitor
                .record_api_call(&self.method, true, self.latency, self.chat_id, None);
        }
        self
    }

    /// Record a failed call together with its error
    pub fn fail(&self, error: &ApiError) -> &Self {
        self.monitor
            .record_api_call(&self.method, false, self.latency, self.chat_id, None);
        self.monitor
            .record_error(error, &self.method, self.chat_id, None, 0);
        self
    }
}
