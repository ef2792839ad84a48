//! Call instrumentation
//!
//! Wraps a Bot API operation so its latency and outcome are recorded before
//! the result is handed back. Failures are converted to the recorder's
//! taxonomy through [`ApiFailure`]; the caller still receives the original
//! error value.

use super::recorder::ApiMonitor;
use super::taxonomy::ApiError;
use std::future::Future;
use std::time::Instant;

/// Identity of one instrumented call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    pub method_name: String,
    pub chat_id: Option<i64>,
    pub user_id: Option<i64>,
    pub retry_count: u32,
}

impl CallContext {
    pub fn new<S: Into<String>>(method_name: S) -> Self {
        Self {
            method_name: method_name.into(),
            chat_id: None,
            user_id: None,
            retry_count: 0,
        }
    }

    pub fn chat(mut self, chat_id: i64) -> Self {
        self.chat_id = Some(chat_id);
        self
    }

    pub fn user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Number of retries already spent on this call
    pub fn retry(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }
}

/// Errors that can be reported to the recorder
pub trait ApiFailure {
    fn api_error(&self) -> ApiError;
}

impl ApiFailure for ApiError {
    fn api_error(&self) -> ApiError {
        self.clone()
    }
}

impl ApiFailure for reqwest::Error {
    fn api_error(&self) -> ApiError {
        ApiError::from_transport(self)
    }
}

impl ApiMonitor {
    fn record_outcome<T, E: ApiFailure>(
        &self,
        context: &CallContext,
        started: Instant,
        result: &Result<T, E>,
    ) {
        let latency = started.elapsed();
        self.record_api_call(
            &context.method_name,
            result.is_ok(),
            latency,
            context.chat_id,
            context.user_id,
        );

        if let Err(failure) = result {
            self.record_error(
                &failure.api_error(),
                &context.method_name,
                context.chat_id,
                context.user_id,
                context.retry_count,
            );
        }
    }
}

/// Await `operation`, recording its outcome before returning it
pub async fn monitor_call<Fut, T, E>(
    monitor: &ApiMonitor,
    context: CallContext,
    operation: Fut,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: ApiFailure,
{
    let started = Instant::now();
    let result = operation.await;
    monitor.record_outcome(&context, started, &result);
    result
}

/// Run `operation` synchronously, recording its outcome before returning it
pub fn monitor_blocking<F, T, E>(monitor: &ApiMonitor, context: CallContext, operation: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: ApiFailure,
{
    let started = Instant::now();
    let result = operation();
    monitor.record_outcome(&context, started, &result);
    result
}
