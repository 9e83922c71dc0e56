// --- File: crates/webinarsync_zoom/src/models.rs ---

use serde::{Deserialize, Serialize};
use webinarsync_common::models::AbsenteeRecord;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Absentees API ---

/// One page of `GET /past_webinars/{id}/absentees`.
///
/// `page_count` and `registrants` are required. A 200 body without them
/// (an error object, a proxy page) must not read as "nobody was absent".
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AbsenteesPage {
    pub page_count: u32,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub total_records: Option<u32>,
    pub registrants: Vec<ZoomRegistrant>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ZoomRegistrant {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Every absentee of a webinar, across all pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbsenteeList {
    pub absentees: Vec<AbsenteeRecord>,
    /// `page_count` as reported on page 0.
    pub page_count: u32,
    pub pages_fetched: u32,
}

impl AbsenteeList {
    /// Zoom reported zero pages, so there is no absentee report to act on.
    pub fn is_empty_report(&self) -> bool {
        self.page_count == 0
    }
}

impl AbsenteesPage {
    /// Absentee emails on this page; entries without an email are dropped.
    pub fn absentee_records(&self) -> impl Iterator<Item = AbsenteeRecord> + '_ {
        self.registrants
            .iter()
            .filter_map(|r| r.email.as_deref())
            .filter(|email| !email.trim().is_empty())
            .map(|email| AbsenteeRecord {
                email: email.to_string(),
            })
    }
}

// --- Webhook payload ---

/// Zoom sends webinar ids as numbers; some relays send them as strings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(untagged)]
pub enum WebinarId {
    Number(u64),
    Text(String),
}

impl WebinarId {
    /// The id as used in API paths and custom field values; `None` if blank.
    pub fn normalized(&self) -> Option<String> {
        match self {
            WebinarId::Number(n) => Some(n.to_string()),
            WebinarId::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WebinarObject {
    #[serde(default)]
    pub id: Option<WebinarId>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WebhookPayload {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub object: Option<WebinarObject>,
}

/// Body of a `webinar.ended` event notification.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WebinarEndedEvent {
    #[cfg_attr(feature = "openapi", schema(example = "webinar.ended"))]
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub payload: Option<WebhookPayload>,
}

impl WebinarEndedEvent {
    /// `payload.object.id`, if present and not blank.
    pub fn webinar_id(&self) -> Option<String> {
        self.payload
            .as_ref()?
            .object
            .as_ref()?
            .id
            .as_ref()?
            .normalized()
    }
}
