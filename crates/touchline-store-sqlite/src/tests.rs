//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use touchline_core::{
  Error as CoreError, ProfileType, Role, Session,
  club_need::{ClubNeedFilter, NeedStatus, NewClubNeed, Urgency},
  contact::NewContactRequest,
  store::KvStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Raw key-value access ────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn set_then_get() {
  let s = store().await;
  s.set("session:1:role", "\"scout\"".into()).await.unwrap();
  assert_eq!(
    s.get("session:1:role").await.unwrap().as_deref(),
    Some("\"scout\"")
  );
}

#[tokio::test]
async fn set_overwrites() {
  let s = store().await;
  s.set("k", "1".into()).await.unwrap();
  s.set("k", "2".into()).await.unwrap();
  assert_eq!(s.get("k").await.unwrap().as_deref(), Some("2"));
  assert_eq!(s.list("k").await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_reports_presence() {
  let s = store().await;
  s.set("k", "1".into()).await.unwrap();
  assert!(s.delete("k").await.unwrap());
  assert!(!s.delete("k").await.unwrap());
  assert!(s.get("k").await.unwrap().is_none());
}

#[tokio::test]
async fn list_matches_prefix_only() {
  let s = store().await;
  s.set("club_need:b", "2".into()).await.unwrap();
  s.set("club_need:a", "1".into()).await.unwrap();
  s.set("club_needle", "x".into()).await.unwrap();
  s.set("session:1:role", "y".into()).await.unwrap();

  let listed = s.list("club_need:").await.unwrap();
  assert_eq!(
    listed,
    vec![
      ("club_need:a".to_owned(), "1".to_owned()),
      ("club_need:b".to_owned(), "2".to_owned()),
    ]
  );
}

#[tokio::test]
async fn list_treats_wildcards_literally() {
  let s = store().await;
  s.set("a_b", "1".into()).await.unwrap();
  s.set("axb", "2".into()).await.unwrap();
  s.set("a%c", "3".into()).await.unwrap();

  let listed = s.list("a_").await.unwrap();
  assert_eq!(listed, vec![("a_b".to_owned(), "1".to_owned())]);
  assert_eq!(s.list("a%").await.unwrap().len(), 1);
}

#[tokio::test]
async fn reopen_file_keeps_data() {
  let path = std::env::temp_dir().join(format!("touchline-{}.db", Uuid::new_v4()));

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.set("session:x:onboarding_complete", "true".into())
      .await
      .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(
    s.get("session:x:onboarding_complete").await.unwrap().as_deref(),
    Some("true")
  );

  drop(s);
  let _ = std::fs::remove_file(&path);
}

// ─── Session over SQLite ─────────────────────────────────────────────────────

async fn session(role: Role) -> Session<SqliteStore> {
  let s = Session::new(Arc::new(store().await), Uuid::new_v4());
  s.set_role(role).await.unwrap();
  s
}

#[tokio::test]
async fn scout_quota_over_sqlite() {
  let s = session(Role::Scout).await;

  for i in 0..5 {
    s.send_contact_request(NewContactRequest {
      target_id:   Uuid::new_v4(),
      target_name: format!("Player {i}"),
      target_type: ProfileType::Player,
      message:     "Saw your last match".into(),
    })
    .await
    .unwrap();
  }

  assert_eq!(s.remaining_contact_requests().await.unwrap(), 0);
  let sixth = s
    .send_contact_request(NewContactRequest {
      target_id:   Uuid::new_v4(),
      target_name: "Player 6".into(),
      target_type: ProfileType::Player,
      message:     String::new(),
    })
    .await;
  assert!(matches!(sixth, Err(CoreError::QuotaExhausted { limit: 5 })));
  assert_eq!(s.contact_requests().await.unwrap().len(), 5);
}

#[tokio::test]
async fn club_need_lifecycle_over_sqlite() {
  let s = session(Role::Club).await;

  let need = s
    .create_club_need(NewClubNeed {
      position:    "Left-back".into(),
      urgency:     Urgency::High,
      description: "Need a left-back".into(),
    })
    .await
    .unwrap();

  let fetched = s.club_need(need.id).await.unwrap().unwrap();
  assert_eq!(fetched, need);

  s.update_club_need_status(need.id, NeedStatus::Filled)
    .await
    .unwrap();
  let reopened = s
    .update_club_need_status(need.id, NeedStatus::Open)
    .await
    .unwrap();
  assert_eq!(reopened.status, NeedStatus::Open);

  s.delete_club_need(need.id).await.unwrap();
  assert!(
    s.club_needs(ClubNeedFilter::default())
      .await
      .unwrap()
      .is_empty()
  );
}
