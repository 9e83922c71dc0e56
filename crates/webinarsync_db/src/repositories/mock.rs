//! In-memory registration store for tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::DbError;
use crate::repositories::participant::{ParticipantStatus, Registrant, RegistrationStore};
use webinarsync_common::models::compute_attendees;

/// Keeps participants in a map and counts calls per operation.
#[derive(Debug, Default)]
pub struct InMemoryRegistrationStore {
    participants: Mutex<Vec<Registrant>>,
    // (field, value) -> event id
    custom_values: Mutex<HashMap<(String, String), i64>>,
    lookups: AtomicUsize,
    selects: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_participants(participants: Vec<Registrant>) -> Self {
        let store = Self::new();
        for participant in participants {
            store.add_participant(participant);
        }
        store
    }

    pub fn add_participant(&self, participant: Registrant) {
        if let Ok(mut participants) = self.participants.lock() {
            participants.push(participant);
            participants.sort_by_key(|p| p.participant_id);
        }
    }

    pub fn link_event(&self, field: &str, value: &str, event_id: i64) {
        if let Ok(mut values) = self.custom_values.lock() {
            values.insert((field.to_string(), value.to_string()), event_id);
        }
    }

    pub fn status_of(&self, participant_id: i64) -> Option<ParticipantStatus> {
        let participants = self.participants.lock().ok()?;
        participants
            .iter()
            .find(|p| p.participant_id == participant_id)
            .map(|p| p.status.clone())
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn select_calls(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.lookup_calls() + self.select_calls() + self.write_calls()
    }
}

fn poisoned() -> DbError {
    DbError::QueryError("in-memory store lock poisoned".to_string())
}

impl RegistrationStore for InMemoryRegistrationStore {
    async fn find_event_by_custom_field(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<i64>, DbError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let values = self.custom_values.lock().map_err(|_| poisoned())?;
        Ok(values.get(&(field.to_string(), value.to_string())).copied())
    }

    async fn select_registered_not_in(
        &self,
        excluded: &HashSet<String>,
        event_id: i64,
    ) -> Result<Vec<Registrant>, DbError> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        let participants = self.participants.lock().map_err(|_| poisoned())?;
        let of_event: Vec<Registrant> = participants
            .iter()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect();
        Ok(compute_attendees(&of_event, excluded))
    }

    async fn set_status(
        &self,
        participant_id: i64,
        status: ParticipantStatus,
    ) -> Result<(), DbError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut participants = self.participants.lock().map_err(|_| poisoned())?;
        let participant = participants
            .iter_mut()
            .find(|p| p.participant_id == participant_id)
            .ok_or_else(|| DbError::NotFound(format!("participant {participant_id}")))?;
        participant.status = status;
        Ok(())
    }
}
