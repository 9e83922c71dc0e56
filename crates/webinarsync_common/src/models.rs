// --- File: crates/webinarsync_common/src/models.rs ---

// Domain records shared by the store, the Zoom client and the attendance
// handler.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Attendance status of a participant, stored as its CRM label.
///
/// Labels other than the four the reconciler knows about (waitlists, pay
/// later, site-specific ones) are carried as `Other` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParticipantStatus {
    Registered,
    Attended,
    NoShow,
    Cancelled,
    Other(String),
}

impl ParticipantStatus {
    pub fn label(&self) -> &str {
        match self {
            ParticipantStatus::Registered => "Registered",
            ParticipantStatus::Attended => "Attended",
            ParticipantStatus::NoShow => "No-show",
            ParticipantStatus::Cancelled => "Cancelled",
            ParticipantStatus::Other(label) => label,
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for ParticipantStatus {
    fn from(label: &str) -> Self {
        match label {
            "Registered" => ParticipantStatus::Registered,
            "Attended" => ParticipantStatus::Attended,
            "No-show" => ParticipantStatus::NoShow,
            "Cancelled" => ParticipantStatus::Cancelled,
            other => ParticipantStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ParticipantStatus {
    fn from(label: String) -> Self {
        ParticipantStatus::from(label.as_str())
    }
}

impl From<ParticipantStatus> for String {
    fn from(status: ParticipantStatus) -> Self {
        match status {
            ParticipantStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl FromStr for ParticipantStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ParticipantStatus::from(s))
    }
}

/// A contact registered for a local event, with its primary email.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrant {
    pub participant_id: i64,
    pub contact_id: i64,
    pub email: String,
    pub event_id: i64,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "Registered"))]
    pub status: ParticipantStatus,
}

/// A registrant the provider reports as not having joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenteeRecord {
    pub email: String,
}

/// Response row for a participant marked as attended.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeRecord {
    pub email: String,
    pub contact_id: i64,
    pub participant_id: i64,
}

impl From<&Registrant> for AttendeeRecord {
    fn from(registrant: &Registrant) -> Self {
        Self {
            email: registrant.email.clone(),
            contact_id: registrant.contact_id,
            participant_id: registrant.participant_id,
        }
    }
}

/// Canonical form used when comparing emails: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalized absentee emails. Blank entries are dropped.
pub fn normalized_absentees<'a, I>(absentees: I) -> HashSet<String>
where
    I: IntoIterator<Item = &'a AbsenteeRecord>,
{
    absentees
        .into_iter()
        .map(|a| normalize_email(&a.email))
        .filter(|email| !email.is_empty())
        .collect()
}

/// Registrants whose normalized email is not in `excluded`.
///
/// `excluded` must already be normalized. Input order is kept.
pub fn compute_attendees(registrants: &[Registrant], excluded: &HashSet<String>) -> Vec<Registrant> {
    registrants
        .iter()
        .filter(|r| !excluded.contains(&normalize_email(&r.email)))
        .cloned()
        .collect()
}
