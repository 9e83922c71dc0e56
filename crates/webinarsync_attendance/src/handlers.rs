// --- File: crates/webinarsync_attendance/src/handlers.rs ---

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use tracing::info;
use webinarsync_common::log_result;
use webinarsync_db::RegistrationStore;
use webinarsync_zoom::{AbsenteeSource, WebinarEndedEvent};

use crate::error::AttendanceError;
use crate::logic::{AttendanceReconciler, AttendanceResponse, ReconciliationRequest};

#[cfg(feature = "openapi")]
use utoipa::IntoParams;

/// Query string Zoom is configured to call the webhook with.
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct WebhookQuery {
    pub verification_token: String,
    /// CRM event id selecting the Zoom account.
    pub event_id: String,
}

pub type AttendanceState<S, A> = Arc<AttendanceReconciler<S, A>>;

/// `POST /zoom/webinar-attendance`
pub async fn handle_webinar_attendance<S, A>(
    State(reconciler): State<AttendanceState<S, A>>,
    Query(query): Query<WebhookQuery>,
    Json(body): Json<WebinarEndedEvent>,
) -> Result<Json<AttendanceResponse>, AttendanceError>
where
    S: RegistrationStore + Send + Sync + 'static,
    A: AbsenteeSource + Send + Sync + 'static,
{
    info!(
        event = body.event.as_deref().unwrap_or("unknown"),
        event_id = %query.event_id,
        "Zoom webinar webhook received"
    );

    // A missing id is only reported once the caller is known to be Zoom.
    let webinar_id = body.webinar_id().unwrap_or_default();

    let request = ReconciliationRequest {
        verification_token: query.verification_token,
        event_id: query.event_id,
        webinar_id,
    };

    if request.webinar_id.is_empty() {
        reconciler.verify_request(&request)?;
        return Err(AttendanceError::InvalidPayload(
            "payload.object.id is missing".to_string(),
        ));
    }

    let result = log_result(
        reconciler.reconcile(&request).await,
        "Webinar attendance webhook handled",
        "Webinar attendance webhook failed",
    )?;

    Ok(Json(AttendanceResponse::from(&result)))
}
