// --- File: crates/webinarsync_common/src/lib.rs ---

pub mod error;   // Error handling
pub mod http;    // HTTP utilities
pub mod logging; // Logging utilities
pub mod models;  // Shared domain records

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, internal_error, HttpStatusCode, WebinarSyncError,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, send_with_retry, RetryPolicy},
    IntoHttpResponse,
};

pub use logging::{init_from_config, init_with_level, log_error, log_result};

pub use models::{
    compute_attendees, normalize_email, normalized_absentees, AbsenteeRecord, AttendeeRecord,
    ParticipantStatus, Registrant,
};
