// --- File: crates/webinarsync_attendance/src/lib.rs ---

pub mod auth;     // Verification token check
pub mod error;
pub mod handlers; // Axum handler for the Zoom webhook
pub mod logic;    // Reconciliation pass
pub mod routes;
#[cfg(feature = "openapi")]
pub mod doc;

pub use auth::{verify_token, TokenVerifier};
pub use error::AttendanceError;
pub use logic::{
    AttendanceReconciler, AttendanceResponse, ReconciliationRequest, ReconciliationResult,
    ReconciliationStage,
};
pub use routes::routes;
