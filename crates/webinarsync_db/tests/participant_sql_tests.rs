use std::collections::HashSet;
use std::path::PathBuf;

use webinarsync_common::models::{ParticipantStatus, Registrant};
use webinarsync_db::{DbClient, DbError, RegistrationStore, SqlParticipantRepository};

struct TestDb {
    path: PathBuf,
    client: DbClient,
    repo: SqlParticipantRepository,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.path).ok();
    }
}

// A file per test; every pooled connection to `:memory:` would see its own
// empty database.
async fn setup() -> TestDb {
    let path = std::env::temp_dir().join(format!("webinarsync-{}.db", uuid::Uuid::new_v4()));
    let client = DbClient::from_url(&format!("sqlite://{}", path.display()))
        .await
        .unwrap();
    let repo = SqlParticipantRepository::new(client.clone());
    repo.init_schema().await.unwrap();

    for statement in [
        "INSERT INTO civicrm_event (id, title) VALUES (1, 'Intro webinar'), (2, 'Other')",
        "INSERT INTO civicrm_event_custom_value (entity_id, field_name, value) \
         VALUES (1, 'custom_12', '81234567890'), (2, 'custom_12', '99999')",
        "INSERT INTO civicrm_participant (id, contact_id, event_id, status) VALUES \
         (10, 100, 1, 'Registered'), \
         (11, 101, 1, 'Registered'), \
         (12, 102, 1, 'Registered'), \
         (13, 103, 1, 'Registered'), \
         (20, 100, 2, 'Registered')",
        "INSERT INTO civicrm_email (contact_id, email, is_primary) VALUES \
         (100, 'ann@example.org', 1), \
         (100, 'ann.old@example.org', 0), \
         (101, 'Bob@Example.org', 1), \
         (102, 'carol@example.org', 1)",
    ] {
        client.execute(statement).await.unwrap();
    }

    TestDb { path, client, repo }
}

fn emails(registrants: &[Registrant]) -> Vec<&str> {
    registrants.iter().map(|r| r.email.as_str()).collect()
}

#[tokio::test]
async fn test_init_schema_is_repeatable() {
    let db = setup().await;
    db.repo.init_schema().await.unwrap();
}

#[tokio::test]
async fn test_find_event_by_custom_field() {
    let db = setup().await;
    assert_eq!(
        db.repo
            .find_event_by_custom_field("custom_12", "81234567890")
            .await
            .unwrap(),
        Some(1)
    );
    assert_eq!(
        db.repo
            .find_event_by_custom_field("custom_12", "404")
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        db.repo
            .find_event_by_custom_field("custom_13", "81234567890")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_select_with_empty_exclusion_returns_all_with_primary_email() {
    let db = setup().await;
    let attendees = db
        .repo
        .select_registered_not_in(&HashSet::new(), 1)
        .await
        .unwrap();

    // Participant 13 has no primary email.
    assert_eq!(
        emails(&attendees),
        vec!["ann@example.org", "Bob@Example.org", "carol@example.org"]
    );
    assert!(attendees.iter().all(|r| r.event_id == 1));
    assert_eq!(attendees[0].participant_id, 10);
    assert_eq!(attendees[0].contact_id, 100);
    assert_eq!(attendees[0].status, ParticipantStatus::Registered);
}

#[tokio::test]
async fn test_select_excludes_normalized_emails() {
    let db = setup().await;
    let excluded: HashSet<String> = ["bob@example.org".to_string(), "ghost@example.org".to_string()].into();

    let attendees = db.repo.select_registered_not_in(&excluded, 1).await.unwrap();
    assert_eq!(emails(&attendees), vec!["ann@example.org", "carol@example.org"]);
}

#[tokio::test]
async fn test_select_with_large_exclusion_set() {
    let db = setup().await;
    let mut excluded: HashSet<String> = (0..5000).map(|i| format!("user{i}@example.org")).collect();
    excluded.insert("carol@example.org".to_string());

    let attendees = db.repo.select_registered_not_in(&excluded, 1).await.unwrap();
    assert_eq!(emails(&attendees), vec!["ann@example.org", "Bob@Example.org"]);
}

#[tokio::test]
async fn test_set_status_is_idempotent() {
    let db = setup().await;
    db.repo.set_status(10, ParticipantStatus::Attended).await.unwrap();
    db.repo.set_status(10, ParticipantStatus::Attended).await.unwrap();

    let attendees = db
        .repo
        .select_registered_not_in(&HashSet::new(), 1)
        .await
        .unwrap();
    assert_eq!(attendees[0].status, ParticipantStatus::Attended);
    assert_eq!(attendees[1].status, ParticipantStatus::Registered);
}

#[tokio::test]
async fn test_set_status_unknown_participant() {
    let db = setup().await;
    let result = db.repo.set_status(999, ParticipantStatus::Attended).await;
    assert!(matches!(result, Err(DbError::NotFound(_))));
}

#[tokio::test]
async fn test_other_status_labels_do_not_fail_the_select() {
    let db = setup().await;
    db.client
        .execute("UPDATE civicrm_participant SET status = 'On waitlist' WHERE id = 11")
        .await
        .unwrap();

    let attendees = db
        .repo
        .select_registered_not_in(&HashSet::new(), 1)
        .await
        .unwrap();

    let ids: Vec<i64> = attendees.iter().map(|r| r.participant_id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
    assert_eq!(
        attendees[1].status,
        ParticipantStatus::Other("On waitlist".to_string())
    );

    // Writing it back keeps the label as stored.
    db.repo
        .set_status(11, attendees[1].status.clone())
        .await
        .unwrap();
    let again = db
        .repo
        .select_registered_not_in(&HashSet::new(), 1)
        .await
        .unwrap();
    assert_eq!(again[1].status.label(), "On waitlist");
}
