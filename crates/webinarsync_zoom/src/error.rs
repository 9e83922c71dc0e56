// --- File: crates/webinarsync_zoom/src/error.rs ---

use thiserror::Error;
use webinarsync_common::{external_service_error, WebinarSyncError};

#[derive(Error, Debug)]
pub enum ZoomError {
    #[error("Zoom API request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Zoom API returned an error: Status={status}, Message='{message}'")]
    ApiError { status: u16, message: String },
    #[error("Failed to parse Zoom API response: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Failed to sign Zoom API credential: {0}")]
    CredentialError(String),
    #[error("Zoom configuration error: {0}")]
    ConfigError(String),
}

impl From<ZoomError> for WebinarSyncError {
    fn from(err: ZoomError) -> Self {
        match err {
            ZoomError::CredentialError(msg) | ZoomError::ConfigError(msg) => {
                WebinarSyncError::ConfigError(msg)
            }
            ZoomError::RequestError(e) if e.is_timeout() => {
                WebinarSyncError::TimeoutError(format!("Zoom API: {e}"))
            }
            other => external_service_error("Zoom API", other),
        }
    }
}
