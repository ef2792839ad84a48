//! Bot API error taxonomy
//!
//! Failures reported by the messaging API boundary are reduced to a closed set
//! of kinds before they reach the recorder. The recorder never inspects
//! runtime types; it matches on [`ApiErrorKind`] and the optional status code.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Closed set of API failure kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The API rejected the request as malformed or not applicable
    BadRequest,
    /// The bot lacks rights for the target chat or user
    Forbidden,
    /// Transport failure or upstream 5xx
    NetworkError,
    /// The request did not complete in time
    TimedOut,
    /// Any other Bot API failure
    Telegram,
    /// A failure raised outside the API client, named by its source
    Other(String),
}

impl ApiErrorKind {
    /// Taxonomy tag used as the breakdown key in reports
    pub fn tag(&self) -> Cow<'_, str> {
        match self {
            ApiErrorKind::BadRequest => Cow::Borrowed("BadRequest"),
            ApiErrorKind::Forbidden => Cow::Borrowed("Forbidden"),
            ApiErrorKind::NetworkError => Cow::Borrowed("NetworkError"),
            ApiErrorKind::TimedOut => Cow::Borrowed("TimedOut"),
            ApiErrorKind::Telegram => Cow::Borrowed("TelegramError"),
            ApiErrorKind::Other(name) => Cow::Borrowed(name.as_str()),
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl Serialize for ApiErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

/// A failed Bot API call as seen by the recorder
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Taxonomy kind
    pub kind: ApiErrorKind,
    /// HTTP-style status code, when the API reported one
    pub status_code: Option<u16>,
    /// Human-readable description
    pub message: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(kind: ApiErrorKind, message: S) -> Self {
        Self {
            kind,
            status_code: None,
            message: message.into(),
        }
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::new(ApiErrorKind::BadRequest, message)
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::new(ApiErrorKind::Forbidden, message)
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::new(ApiErrorKind::NetworkError, message)
    }

    pub fn timed_out<S: Into<String>>(message: S) -> Self {
        Self::new(ApiErrorKind::TimedOut, message)
    }

    pub fn other<N: Into<String>, S: Into<String>>(source: N, message: S) -> Self {
        Self::new(ApiErrorKind::Other(source.into()), message)
    }

    /// Attach a status code
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Map a Bot API error response (`error_code` + `description`) onto the taxonomy
    pub fn from_status<S: Into<String>>(status_code: u16, description: S) -> Self {
        let description = description.into();
        let (kind, message) = match status_code {
            400 => (ApiErrorKind::BadRequest, description),
            401 | 403 => (ApiErrorKind::Forbidden, description),
            429 if mentions_rate_limit(&description) => (ApiErrorKind::Telegram, description),
            429 => (
                ApiErrorKind::Telegram,
                format!("Too Many Requests: {}", description),
            ),
            500..=599 => (ApiErrorKind::NetworkError, description),
            _ => (ApiErrorKind::Telegram, description),
        };
        Self::new(kind, message).with_status(status_code)
    }

    /// Map a transport failure from the HTTP client onto the taxonomy
    pub fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::timed_out(error.to_string());
        }
        if let Some(status) = error.status() {
            return Self::from_status(status.as_u16(), error.to_string());
        }
        if error.is_decode() {
            return Self::new(ApiErrorKind::Telegram, error.to_string());
        }
        Self::network(error.to_string())
    }

    /// Ingestion-time bucket: the first matching rule wins
    pub fn bucket(&self) -> ErrorBucket {
        match (&self.kind, self.status_code) {
            (ApiErrorKind::BadRequest, Some(400..=499)) => ErrorBucket::ClientError,
            (ApiErrorKind::Forbidden, _) => ErrorBucket::Forbidden,
            (ApiErrorKind::NetworkError, code) => ErrorBucket::Network {
                server_error: is_server_error(code),
            },
            (ApiErrorKind::TimedOut, _) => ErrorBucket::Timeout,
            _ if mentions_rate_limit(&self.message) => ErrorBucket::RateLimited,
            _ => ErrorBucket::Unclassified,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::from_transport(&error)
    }
}

/// Fixed ingestion buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorBucket {
    /// BadRequest carrying a 4xx code
    ClientError,
    /// Forbidden, counted as 4xx whatever the code
    Forbidden,
    /// Network failure; `server_error` when the code is 5xx
    Network { server_error: bool },
    Timeout,
    /// Rate limiting detected from the message text
    RateLimited,
    /// Matched none of the rules; only the per-kind counter moves
    Unclassified,
}

pub(crate) fn is_client_error(code: Option<u16>) -> bool {
    matches!(code, Some(400..=499))
}

pub(crate) fn is_server_error(code: Option<u16>) -> bool {
    matches!(code, Some(500..=599))
}

pub(crate) fn mentions_rate_limit(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("rate limit") || lower.contains("too many requests")
}
