// --- File: crates/webinarsync_attendance/src/logic.rs ---

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use webinarsync_common::models::{
    normalized_absentees, AttendeeRecord, ParticipantStatus, Registrant,
};
use webinarsync_config::{ZoomAccountConfig, ZoomConfig};
use webinarsync_db::RegistrationStore;
use webinarsync_zoom::{credentials, AbsenteeSource};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::auth::TokenVerifier;
use crate::error::AttendanceError;

pub use webinarsync_common::models::compute_attendees;

/// Progress of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationStage {
    Unverified,
    CredentialMinted,
    /// Every absentee page is in.
    AbsenteesFetched,
    Reconciled,
    StatusesWritten,
}

impl fmt::Display for ReconciliationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconciliationStage::Unverified => f.write_str("unverified"),
            ReconciliationStage::CredentialMinted => f.write_str("credential-minted"),
            ReconciliationStage::AbsenteesFetched => f.write_str("absentees-fetched"),
            ReconciliationStage::Reconciled => f.write_str("reconciled"),
            ReconciliationStage::StatusesWritten => f.write_str("statuses-written"),
        }
    }
}

/// Input of one pass, taken from the webhook request.
#[derive(Debug, Clone)]
pub struct ReconciliationRequest {
    pub verification_token: String,
    /// CRM event id used to pick the Zoom account.
    pub event_id: String,
    pub webinar_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationResult {
    pub event_id: i64,
    pub webinar_id: String,
    /// Participants now marked as attended.
    pub attendees: Vec<Registrant>,
    pub absentee_count: usize,
    pub pages_fetched: u32,
}

/// Success body in the CRM API v3 shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AttendanceResponse {
    pub is_error: u8,
    pub version: u8,
    pub count: usize,
    pub values: Vec<AttendeeRecord>,
}

impl From<&ReconciliationResult> for AttendanceResponse {
    fn from(result: &ReconciliationResult) -> Self {
        let values: Vec<AttendeeRecord> = result.attendees.iter().map(AttendeeRecord::from).collect();
        Self {
            is_error: 0,
            version: 3,
            count: values.len(),
            values,
        }
    }
}

/// Runs the webinar-ended flow: verify, look up settings and the local
/// event, fetch absentees, mark everyone else as attended.
pub struct AttendanceReconciler<S, A> {
    store: Arc<S>,
    source: Arc<A>,
    verifier: TokenVerifier,
    zoom: ZoomConfig,
}

impl<S, A> AttendanceReconciler<S, A>
where
    S: RegistrationStore + Send + Sync,
    A: AbsenteeSource + Send + Sync,
{
    pub fn new(store: Arc<S>, source: Arc<A>, zoom: ZoomConfig) -> Self {
        let verifier = TokenVerifier::new(zoom.verification_token.clone());
        Self {
            store,
            source,
            verifier,
            zoom,
        }
    }

    /// Token check on its own, for requests rejected before reconciling.
    pub fn verify_request(&self, request: &ReconciliationRequest) -> Result<(), AttendanceError> {
        self.verifier.verify(&request.verification_token)
    }

    /// Zoom account for a CRM event id.
    pub fn settings_for_event(&self, event_id: &str) -> Result<&ZoomAccountConfig, AttendanceError> {
        self.zoom
            .account_for_event(event_id)
            .ok_or_else(|| AttendanceError::MissingSettings {
                event_id: event_id.to_string(),
            })
    }

    /// Local event whose webinar custom field holds `webinar_id`.
    pub async fn resolve_local_event(&self, webinar_id: &str) -> Result<i64, AttendanceError> {
        let field = self
            .zoom
            .webinar_custom_field
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .ok_or(AttendanceError::CustomFieldNotConfigured)?;

        self.store
            .find_event_by_custom_field(field, webinar_id)
            .await?
            .ok_or_else(|| AttendanceError::EventNotFound {
                webinar_id: webinar_id.to_string(),
            })
    }

    pub async fn reconcile(
        &self,
        request: &ReconciliationRequest,
    ) -> Result<ReconciliationResult, AttendanceError> {
        self.reconcile_at(request, Utc::now()).await
    }

    /// [`Self::reconcile`] with an explicit clock for the credential.
    ///
    /// Any error stops the pass. Statuses already written stay written.
    pub async fn reconcile_at(
        &self,
        request: &ReconciliationRequest,
        now: DateTime<Utc>,
    ) -> Result<ReconciliationResult, AttendanceError> {
        let webinar_id = request.webinar_id.as_str();
        let mut stage = ReconciliationStage::Unverified;
        debug!(webinar_id, %stage, "Reconciliation started");

        self.verify_request(request)?;

        let account = self.settings_for_event(&request.event_id)?;
        let event_id = self.resolve_local_event(webinar_id).await?;

        let token = credentials::mint(&account.api_key, &account.secret_key, now)?;
        stage = advance(stage, ReconciliationStage::CredentialMinted, webinar_id);

        let list = self
            .source
            .fetch_all_absentees(&account.base_url, webinar_id, &token)
            .await?;
        stage = advance(stage, ReconciliationStage::AbsenteesFetched, webinar_id);

        if list.is_empty_report() {
            info!(
                event_id,
                webinar_id, "Zoom reported no absentee pages; leaving statuses untouched"
            );
            return Ok(ReconciliationResult {
                event_id,
                webinar_id: webinar_id.to_string(),
                attendees: Vec::new(),
                absentee_count: 0,
                pages_fetched: list.pages_fetched,
            });
        }

        let excluded = normalized_absentees(&list.absentees);
        let mut attendees = self.store.select_registered_not_in(&excluded, event_id).await?;
        stage = advance(stage, ReconciliationStage::Reconciled, webinar_id);

        for attendee in attendees.iter_mut() {
            self.store
                .set_status(attendee.participant_id, ParticipantStatus::Attended)
                .await
                .inspect_err(|e| {
                    warn!(
                        participant_id = attendee.participant_id,
                        error = %e,
                        "Failed to mark participant as attended"
                    )
                })?;
            attendee.status = ParticipantStatus::Attended;
        }
        advance(stage, ReconciliationStage::StatusesWritten, webinar_id);

        info!(
            event_id,
            webinar_id,
            attendees = attendees.len(),
            absentees = excluded.len(),
            pages = list.pages_fetched,
            "Webinar attendance reconciled"
        );

        Ok(ReconciliationResult {
            event_id,
            webinar_id: webinar_id.to_string(),
            attendees,
            absentee_count: excluded.len(),
            pages_fetched: list.pages_fetched,
        })
    }
}

fn advance(
    from: ReconciliationStage,
    to: ReconciliationStage,
    webinar_id: &str,
) -> ReconciliationStage {
    debug!(webinar_id, %from, %to, "Reconciliation stage");
    to
}
