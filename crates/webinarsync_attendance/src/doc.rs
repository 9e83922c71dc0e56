// --- File: crates/webinarsync_attendance/src/doc.rs ---

#![cfg(feature = "openapi")]
// The doc_ function only carries the utoipa::path attribute.
#![allow(dead_code)]

use utoipa::OpenApi;
use webinarsync_common::models::AttendeeRecord;
use webinarsync_zoom::models::{WebhookPayload, WebinarEndedEvent, WebinarId, WebinarObject};

use crate::handlers::WebhookQuery;
use crate::logic::AttendanceResponse;

#[utoipa::path(
    post,
    path = "/zoom/webinar-attendance",
    params(WebhookQuery),
    request_body(
        content = WebinarEndedEvent,
        description = "Zoom webinar.ended event notification",
        example = json!({
            "event": "webinar.ended",
            "payload": { "object": { "id": 81234567890u64 } }
        })
    ),
    responses(
        (status = 200, description = "Participants who were not absent are marked as Attended", body = AttendanceResponse, example = json!({
            "is_error": 0,
            "version": 3,
            "count": 1,
            "values": [{ "email": "ann@example.org", "contact_id": 100, "participant_id": 10 }]
        })),
        (status = 400, description = "Missing query parameter or webinar id"),
        (status = 401, description = "Invalid verification token", example = json!({
            "error": { "message": "Authentication error: Invalid verification token.", "code": 401 }
        })),
        (status = 404, description = "No event is linked to the webinar"),
        (status = 500, description = "Missing Zoom settings or database error"),
        (status = 502, description = "Zoom API error")
    ),
    tag = "Zoom"
)]
fn doc_handle_webinar_attendance() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_handle_webinar_attendance),
    components(schemas(
        WebinarEndedEvent,
        WebhookPayload,
        WebinarObject,
        WebinarId,
        AttendanceResponse,
        AttendeeRecord
    )),
    tags((name = "Zoom", description = "Zoom webinar webhooks"))
)]
pub struct AttendanceApiDoc;
