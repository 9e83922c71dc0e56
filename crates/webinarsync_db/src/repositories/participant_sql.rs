//! SQL implementation of the registration store
//!
//! Reads and writes the CRM tables `civicrm_participant`, `civicrm_email` and
//! `civicrm_event_custom_value`.

use std::collections::HashSet;

use crate::error::DbError;
use crate::repositories::participant::{ParticipantStatus, Registrant, RegistrationStore};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};
use webinarsync_common::models::normalize_email;

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS civicrm_event (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS civicrm_event_custom_value (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        entity_id INTEGER NOT NULL,
        field_name TEXT NOT NULL,
        value TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS civicrm_participant (
        id INTEGER PRIMARY KEY,
        contact_id INTEGER NOT NULL,
        event_id INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'Registered'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS civicrm_email (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        contact_id INTEGER NOT NULL,
        email TEXT NOT NULL,
        is_primary INTEGER NOT NULL DEFAULT 0
    )
    "#,
];

#[derive(Debug, Clone)]
pub struct SqlParticipantRepository {
    db_client: DbClient,
}

impl SqlParticipantRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Creates the CRM tables if they do not exist.
    ///
    /// Production databases belong to the CRM; this is for development and
    /// test databases.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing participant schema");

        let mut tx = self.db_client.begin().await?;
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;
        }
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!("Participant schema initialized successfully");
        Ok(())
    }
}

fn registrant_from_row(row: &AnyRow) -> Result<Registrant, DbError> {
    let status: String = row.try_get("status")?;
    Ok(Registrant {
        participant_id: row.try_get("participant_id")?,
        contact_id: row.try_get("contact_id")?,
        email: row.try_get("email")?,
        event_id: row.try_get("event_id")?,
        status: ParticipantStatus::from(status),
    })
}

impl RegistrationStore for SqlParticipantRepository {
    async fn find_event_by_custom_field(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<i64>, DbError> {
        debug!(field, value, "Looking up event by custom field");

        let query = r#"
            SELECT entity_id
            FROM civicrm_event_custom_value
            WHERE field_name = $1 AND value = $2
            ORDER BY entity_id
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(field)
            .bind(value)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to look up event: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        match row {
            Some(row) => Ok(Some(row.try_get("entity_id")?)),
            None => Ok(None),
        }
    }

    async fn select_registered_not_in(
        &self,
        excluded: &HashSet<String>,
        event_id: i64,
    ) -> Result<Vec<Registrant>, DbError> {
        debug!(event_id, excluded = excluded.len(), "Selecting attendees");

        // Exclusion happens below on normalized emails, never in SQL.
        let query = r#"
            SELECT
                p.id AS participant_id,
                p.contact_id AS contact_id,
                p.event_id AS event_id,
                p.status AS status,
                e.email AS email
            FROM civicrm_participant p
            JOIN civicrm_email e
                ON e.contact_id = p.contact_id AND e.is_primary = 1
            WHERE p.event_id = $1
            ORDER BY p.id
        "#;

        let rows = sqlx::query(query)
            .bind(event_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to select participants: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let mut attendees = Vec::with_capacity(rows.len());
        for row in &rows {
            let registrant = registrant_from_row(row)?;
            if !excluded.contains(&normalize_email(&registrant.email)) {
                attendees.push(registrant);
            }
        }
        Ok(attendees)
    }

    async fn set_status(
        &self,
        participant_id: i64,
        status: ParticipantStatus,
    ) -> Result<(), DbError> {
        let query = r#"
            UPDATE civicrm_participant
            SET status = $1
            WHERE id = $2
        "#;

        let result = sqlx::query(query)
            .bind(status.label())
            .bind(participant_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update participant {}: {}", participant_id, e);
                DbError::QueryError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("participant {participant_id}")));
        }
        debug!(participant_id, %status, "Participant status updated");
        Ok(())
    }
}
