// --- File: crates/webinarsync_zoom/src/lib.rs ---
//! Zoom REST API access: signing the API credential and listing the
//! absentees of a past webinar.

pub mod client;
pub mod credentials;
pub mod error;
pub mod models;

pub use client::{AbsenteeSource, ZoomClient};
pub use credentials::{mint, CREDENTIAL_TTL_SECS};
pub use error::ZoomError;
pub use models::{AbsenteeList, AbsenteesPage, WebinarEndedEvent, WebinarId};
