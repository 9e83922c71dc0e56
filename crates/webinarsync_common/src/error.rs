// --- File: crates/webinarsync_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all webinarsync errors.
///
/// Each crate keeps its own error enum and implements
/// `From<SpecificError> for WebinarSyncError`, which is what the HTTP layer
/// turns into a response.
#[derive(Error, Debug)]
pub enum WebinarSyncError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for WebinarSyncError {
    fn status_code(&self) -> u16 {
        match self {
            WebinarSyncError::ConfigError(_) => 500,
            WebinarSyncError::AuthError(_) => 401,
            WebinarSyncError::ValidationError(_) => 400,
            WebinarSyncError::DatabaseError(_) => 500,
            WebinarSyncError::ExternalServiceError { .. } => 502,
            WebinarSyncError::NotFoundError(_) => 404,
            WebinarSyncError::TimeoutError(_) => 504,
            WebinarSyncError::InternalError(_) => 500,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> WebinarSyncError {
    WebinarSyncError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(
    service_name: &str,
    message: T,
) -> WebinarSyncError {
    WebinarSyncError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> WebinarSyncError {
    WebinarSyncError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(WebinarSyncError::AuthError("x".into()).status_code(), 401);
        assert_eq!(config_error("missing").status_code(), 500);
        assert_eq!(WebinarSyncError::ValidationError("bad".into()).status_code(), 400);
        assert_eq!(WebinarSyncError::NotFoundError("event".into()).status_code(), 404);
        assert_eq!(external_service_error("Zoom API", "boom").status_code(), 502);
        assert_eq!(internal_error("oops").status_code(), 500);
    }

    #[test]
    fn test_external_service_error_message() {
        let err = external_service_error("Zoom API", "Status: 404");
        assert_eq!(
            err.to_string(),
            "External service error: Zoom API - Status: 404"
        );
    }
}
