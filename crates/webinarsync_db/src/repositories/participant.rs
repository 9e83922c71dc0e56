//! Store interface for event participants
//!
//! The attendance reconciler only needs three operations from the CRM:
//! find the event a webinar belongs to, list the registered participants that
//! were not absent, and mark a participant's status.

use std::collections::HashSet;
use std::future::Future;

use crate::error::DbError;
pub use webinarsync_common::models::{ParticipantStatus, Registrant};

/// Access to event participants and their primary emails.
pub trait RegistrationStore {
    /// Local event id whose custom field `field` holds `value`.
    ///
    /// With several matches the lowest event id wins.
    fn find_event_by_custom_field(
        &self,
        field: &str,
        value: &str,
    ) -> impl Future<Output = Result<Option<i64>, DbError>> + Send;

    /// Participants of `event_id` whose normalized primary email is not in
    /// `excluded`.
    ///
    /// `excluded` holds normalized emails and may be empty or large.
    /// Participants without a primary email are skipped. Ordered by
    /// participant id.
    fn select_registered_not_in(
        &self,
        excluded: &HashSet<String>,
        event_id: i64,
    ) -> impl Future<Output = Result<Vec<Registrant>, DbError>> + Send;

    /// Sets the status of one participant. Setting the current status again
    /// succeeds; an unknown id is `DbError::NotFound`.
    fn set_status(
        &self,
        participant_id: i64,
        status: ParticipantStatus,
    ) -> impl Future<Output = Result<(), DbError>> + Send;
}
