//! Tests against a live backend.
//!
//! These need the `integration_tests` feature, plus `CALENDAR_TODO_URL`, `CALENDAR_TODO_API_KEY`,
//! `CALENDAR_TODO_USER` and `CALENDAR_TODO_TOKEN` pointing to a disposable test account.
#![cfg(feature = "integration_tests")]

use calendar_todo::client::RestClient;
use calendar_todo::traits::RecordStore;
use calendar_todo::{DayKey, NewRecord, OwnerId, RecordFields, Session};

fn session() -> Session {
    let user = std::env::var("CALENDAR_TODO_USER").unwrap();
    let token = std::env::var("CALENDAR_TODO_TOKEN").unwrap();
    Session::new(OwnerId::new(user), token)
}

#[tokio::test]
async fn round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();

    let client = RestClient::from_env().unwrap();
    let session = session();
    let before = client.list_records(&session).await.unwrap().len();

    let created = client.create_record(&session, NewRecord {
        title: "integration test".to_string(),
        description: "created by tests/rest_store.rs".to_string(),
        due: DayKey::from_ymd(2025, 3, 11).unwrap(),
        category: "test".to_string(),
    }).await.unwrap();
    assert_eq!(created.day().unwrap().to_string(), "2025-03-11");
    assert!(created.completed == false);

    client.update_record(&session, &created.id, RecordFields {
        title: "integration test (edited)".to_string(),
        description: String::new(),
        due: DayKey::from_ymd(2025, 3, 15).unwrap(),
        category: "test".to_string(),
        completed: false,
    }).await.unwrap();
    client.set_completion(&session, &created.id, true).await.unwrap();

    let listed = client.list_records(&session).await.unwrap();
    let edited = listed.iter().find(|r| r.id == created.id).unwrap();
    assert_eq!(edited.title, "integration test (edited)");
    assert_eq!(edited.day().unwrap().to_string(), "2025-03-15");
    assert!(edited.completed);

    client.delete_record(&session, &created.id).await.unwrap();
    assert_eq!(client.list_records(&session).await.unwrap().len(), before);
}

#[tokio::test]
async fn bad_token_is_unauthenticated() {
    let _ = env_logger::builder().is_test(true).try_init();

    let client = RestClient::from_env().unwrap();
    let session = Session::new(OwnerId::new("nobody"), "not-a-valid-token");
    let err = client.list_records(&session).await.unwrap_err();
    assert_eq!(err.kind(), calendar_todo::ErrorKind::Unauthenticated);
}
