// --- File: crates/webinarsync_attendance/src/error.rs ---

use axum::response::{IntoResponse, Response};
use thiserror::Error;
use webinarsync_common::WebinarSyncError;
use webinarsync_db::DbError;
use webinarsync_zoom::ZoomError;

#[derive(Error, Debug)]
pub enum AttendanceError {
    #[error("Invalid verification token.")]
    Unauthorized,
    #[error("No Zoom settings for event {event_id}")]
    MissingSettings { event_id: String },
    #[error("Webinar custom field is not configured")]
    CustomFieldNotConfigured,
    #[error("No event is linked to webinar {webinar_id}")]
    EventNotFound { webinar_id: String },
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Remote(#[from] ZoomError),
    #[error(transparent)]
    Store(#[from] DbError),
}

impl From<AttendanceError> for WebinarSyncError {
    fn from(err: AttendanceError) -> Self {
        match err {
            AttendanceError::Unauthorized => WebinarSyncError::AuthError(err.to_string()),
            AttendanceError::MissingSettings { .. } | AttendanceError::CustomFieldNotConfigured => {
                WebinarSyncError::ConfigError(err.to_string())
            }
            AttendanceError::EventNotFound { .. } => WebinarSyncError::NotFoundError(err.to_string()),
            AttendanceError::InvalidPayload(msg) => WebinarSyncError::ValidationError(msg),
            AttendanceError::Remote(e) => e.into(),
            AttendanceError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for AttendanceError {
    fn into_response(self) -> Response {
        WebinarSyncError::from(self).into_response()
    }
}
