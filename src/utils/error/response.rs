//! HTTP response handling for errors

use super::types::MonitorError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for MonitorError {
    fn status_code(&self) -> StatusCode {
        match self {
            MonitorError::Validation(_) | MonitorError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_code = match self {
            MonitorError::Config(_) => "CONFIG_ERROR",
            MonitorError::Io(_) => "IO_ERROR",
            MonitorError::Serialization(_) => "SERIALIZATION_ERROR",
            MonitorError::Yaml(_) => "CONFIG_ERROR",
            MonitorError::Template(_) => "TEMPLATE_ERROR",
            MonitorError::Validation(_) => "VALIDATION_ERROR",
            MonitorError::BadRequest(_) => "BAD_REQUEST",
            MonitorError::Server(_) => "SERVER_ERROR",
            MonitorError::Internal(_) => "INTERNAL_ERROR",
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.to_string(),
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
