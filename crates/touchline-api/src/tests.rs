//! Router tests against an in-memory store and a small seeded directory.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use serde_json::{Value, json};
use touchline_core::{
  ProfileType,
  profile::{Directory, Profile},
  store::MemoryStore,
};
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::{ApiState, api_router, session::SESSION_HEADER};

struct Fixture {
  state:   ApiState<MemoryStore>,
  player:  Uuid,
  sponsor: Uuid,
}

fn profile(profile_type: ProfileType, name: &str) -> Profile {
  Profile {
    id: Uuid::new_v4(),
    display_name: name.into(),
    profile_type,
    headline: None,
    location: None,
    club: None,
    position: None,
  }
}

fn fixture() -> Fixture {
  let player = profile(ProfileType::Player, "Rui Lopes");
  let sponsor = profile(ProfileType::SponsorCompany, "Kickwear Ltd");
  let (player_id, sponsor_id) = (player.id, sponsor.id);
  Fixture {
    state:   ApiState::new(
      Arc::new(MemoryStore::new()),
      Directory::new(vec![player, sponsor]),
    ),
    player:  player_id,
    sponsor: sponsor_id,
  }
}

async fn call(
  state: &ApiState<MemoryStore>,
  method: &str,
  uri: &str,
  session: Option<Uuid>,
  body: Option<Value>,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(id) = session {
    builder = builder.header(SESSION_HEADER, id.to_string());
  }
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  api_router(state.clone())
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

async fn sign_in(state: &ApiState<MemoryStore>, role: &str) -> Uuid {
  let id = Uuid::new_v4();
  let resp = call(state, "PUT", "/session/role", Some(id), Some(json!({ "role": role }))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let resp = call(state, "POST", "/session/onboarding", Some(id), None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  id
}

// ── Session ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_session_header_is_401() {
  let f = fixture();
  let resp = call(&f.state, "GET", "/session", None, None).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_session_header_is_400() {
  let f = fixture();
  let req = Request::builder()
    .uri("/session")
    .header(SESSION_HEADER, "not-a-uuid")
    .body(Body::empty())
    .unwrap();
  let resp = api_router(f.state.clone()).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn summary_after_sign_in() {
  let f = fixture();
  let id = sign_in(&f.state, "scout").await;
  let body = json_body(call(&f.state, "GET", "/session", Some(id), None).await).await;
  assert_eq!(body["role"], "scout");
  assert_eq!(body["onboarding_complete"], true);
  assert_eq!(body["contact_requests_remaining"], 5);
}

#[tokio::test]
async fn unknown_role_body_is_rejected() {
  let f = fixture();
  let resp = call(
    &f.state,
    "PUT",
    "/session/role",
    Some(Uuid::new_v4()),
    Some(json!({ "role": "referee" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body = json_body(resp).await;
  assert!(body["error"].as_str().unwrap().contains("referee"));
}

#[tokio::test]
async fn malformed_path_and_query_are_json_400s() {
  let f = fixture();
  let club = sign_in(&f.state, "club").await;

  let resp = call(&f.state, "GET", "/club-needs/not-a-uuid", Some(club), None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(json_body(resp).await["error"].is_string());

  let resp = call(&f.state, "GET", "/club-needs?status=pending", Some(club), None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(json_body(resp).await["error"].is_string());
}

#[tokio::test]
async fn summary_includes_navigation() {
  let f = fixture();
  let sponsor = sign_in(&f.state, "sponsor").await;
  let body = json_body(call(&f.state, "GET", "/session", Some(sponsor), None).await).await;
  let nav: Vec<&str> = body["navigation"]
    .as_array()
    .unwrap()
    .iter()
    .map(|v| v.as_str().unwrap())
    .collect();
  assert!(nav.contains(&"/dashboard/sponsor"));
  assert!(!nav.contains(&"/dashboard/jobs"));
}

#[tokio::test]
async fn sign_out_clears_role() {
  let f = fixture();
  let id = sign_in(&f.state, "coach").await;
  let resp = call(&f.state, "DELETE", "/session", Some(id), None).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  let body = json_body(call(&f.state, "GET", "/session", Some(id), None).await).await;
  assert_eq!(body["role"], Value::Null);
}

// ── Navigation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn sponsor_redirected_from_jobs() {
  let f = fixture();
  let id = sign_in(&f.state, "sponsor").await;
  let body = json_body(
    call(&f.state, "GET", "/navigation?path=/dashboard/jobs", Some(id), None).await,
  )
  .await;
  assert_eq!(body["allowed"], false);
  assert_eq!(body["redirect"], "/dashboard/sponsor");
}

#[tokio::test]
async fn anonymous_redirected_to_login() {
  let f = fixture();
  let body = json_body(
    call(
      &f.state,
      "GET",
      "/navigation?path=/dashboard/discover",
      Some(Uuid::new_v4()),
      None,
    )
    .await,
  )
  .await;
  assert_eq!(body["redirect"], "/login");
}

#[tokio::test]
async fn unknown_path_is_404() {
  let f = fixture();
  let resp = call(
    &f.state,
    "GET",
    "/navigation?path=/pricing",
    Some(Uuid::new_v4()),
    None,
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── Reference data ───────────────────────────────────────────────────────────

#[tokio::test]
async fn permissions_for_unknown_role_are_empty() {
  let f = fixture();
  let body = json_body(call(&f.state, "GET", "/permissions/referee", None, None).await).await;
  assert_eq!(body["contact_request_limit"], 0);
  assert_eq!(body["actions"], json!([]));

  let body = json_body(call(&f.state, "GET", "/permissions/scout", None, None).await).await;
  assert_eq!(body["contact_request_limit"], 5);
}

#[tokio::test]
async fn pipeline_stages_in_order() {
  let f = fixture();
  let body = json_body(call(&f.state, "GET", "/pipeline/stages", None, None).await).await;
  let labels: Vec<_> = body
    .as_array()
    .unwrap()
    .iter()
    .map(|s| s["label"].as_str().unwrap().to_owned())
    .collect();
  assert_eq!(
    labels,
    ["New", "Reviewed", "Shortlisted", "Interview", "Offer", "Closed"]
  );
}

// ── Profiles ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn profile_access_states() {
  let f = fixture();
  let scout = sign_in(&f.state, "scout").await;

  let resp = call(&f.state, "GET", &format!("/profiles/{}", f.player), Some(scout), None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["access"], "visible");

  let resp = call(&f.state, "GET", &format!("/profiles/{}", f.sponsor), Some(scout), None).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  assert_eq!(json_body(resp).await["access"], "restricted");

  let resp = call(
    &f.state,
    "GET",
    &format!("/profiles/{}", Uuid::new_v4()),
    Some(scout),
    None,
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn discover_filters_by_role() {
  let f = fixture();
  let scout = sign_in(&f.state, "scout").await;
  let body = json_body(call(&f.state, "GET", "/profiles", Some(scout), None).await).await;
  assert_eq!(body.as_array().unwrap().len(), 1);

  let sponsor = sign_in(&f.state, "sponsor").await;
  let body = json_body(
    call(&f.state, "GET", "/profiles?type=sponsor-company", Some(sponsor), None).await,
  )
  .await;
  assert_eq!(body.as_array().unwrap().len(), 1);
  assert_eq!(body[0]["display_name"], "Kickwear Ltd");
}

// ── Contact requests ─────────────────────────────────────────────────────────

#[tokio::test]
async fn send_contact_request_to_directory_profile() {
  let f = fixture();
  let coach = sign_in(&f.state, "coach").await;

  let resp = call(
    &f.state,
    "POST",
    "/contact-requests",
    Some(coach),
    Some(json!({ "target_id": f.player, "message": "Trial next week?" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body = json_body(resp).await;
  assert_eq!(body["target_name"], "Rui Lopes");
  assert_eq!(body["target_type"], "player");

  let again = call(
    &f.state,
    "POST",
    "/contact-requests",
    Some(coach),
    Some(json!({ "target_id": f.player })),
  )
  .await;
  assert_eq!(again.status(), StatusCode::CONFLICT);

  let state = json_body(
    call(&f.state, "GET", &format!("/contact-requests/{}", f.player), Some(coach), None)
      .await,
  )
  .await;
  assert_eq!(state["sent"], true);
  assert_eq!(state["state"]["state"], "already_sent");
}

#[tokio::test]
async fn scout_quota_exhausted_over_http() {
  let f = fixture();
  let scout = sign_in(&f.state, "scout").await;

  for i in 0..5 {
    let resp = call(
      &f.state,
      "POST",
      "/contact-requests",
      Some(scout),
      Some(json!({
        "target_id": Uuid::new_v4(),
        "target_name": format!("Player {i}"),
        "target_type": "player",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
  }

  let state = json_body(
    call(&f.state, "GET", &format!("/contact-requests/{}", f.player), Some(scout), None)
      .await,
  )
  .await;
  assert_eq!(state["state"]["state"], "quota_exhausted");

  let resp = call(
    &f.state,
    "POST",
    "/contact-requests",
    Some(scout),
    Some(json!({ "target_id": f.player })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_target_needs_name_and_type() {
  let f = fixture();
  let club = sign_in(&f.state, "club").await;
  let resp = call(
    &f.state,
    "POST",
    "/contact-requests",
    Some(club),
    Some(json!({ "target_id": Uuid::new_v4() })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn state_of_target_outside_directory() {
  let f = fixture();
  let club = sign_in(&f.state, "club").await;
  let target = Uuid::new_v4();
  let uri = format!("/contact-requests/{target}");

  let before = json_body(call(&f.state, "GET", &uri, Some(club), None).await).await;
  assert_eq!(before["sent"], false);
  assert!(before["state"].is_null());
  assert_eq!(before["can_send"], false);

  let resp = call(
    &f.state,
    "POST",
    "/contact-requests",
    Some(club),
    Some(json!({
      "target_id": target,
      "target_name": "Ana Ferreira",
      "target_type": "coach",
    })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let resp = call(&f.state, "GET", &uri, Some(club), None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let after = json_body(resp).await;
  assert_eq!(after["sent"], true);
  assert_eq!(after["state"]["state"], "already_sent");
  assert_eq!(after["can_send"], false);
}

#[tokio::test]
async fn directory_target_reports_can_send() {
  let f = fixture();
  let coach = sign_in(&f.state, "coach").await;
  let body = json_body(
    call(&f.state, "GET", &format!("/contact-requests/{}", f.player), Some(coach), None)
      .await,
  )
  .await;
  assert_eq!(body["sent"], false);
  assert_eq!(body["state"]["state"], "available");
  assert_eq!(body["can_send"], true);
}

// ── Club needs ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn club_need_flow() {
  let f = fixture();
  let club = sign_in(&f.state, "club").await;
  let player = sign_in(&f.state, "player").await;

  let resp = call(
    &f.state,
    "POST",
    "/club-needs",
    Some(club),
    Some(json!({
      "position": "Left-back",
      "urgency": "high",
      "description": "Need a left-back",
    })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let need = json_body(resp).await;
  let need_id = need["id"].as_str().unwrap().to_owned();
  assert_eq!(need["status"], "open");
  assert_eq!(need["urgency"], "high");

  // Players see open postings but cannot touch them.
  let listed = json_body(call(&f.state, "GET", "/club-needs", Some(player), None).await).await;
  assert_eq!(listed.as_array().unwrap().len(), 1);
  let resp = call(
    &f.state,
    "PATCH",
    &format!("/club-needs/{need_id}"),
    Some(player),
    Some(json!({ "status": "closed" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);

  let resp = call(
    &f.state,
    "PATCH",
    &format!("/club-needs/{need_id}"),
    Some(club),
    Some(json!({ "status": "filled" })),
  )
  .await;
  assert_eq!(json_body(resp).await["status"], "filled");

  let resp = call(
    &f.state,
    "PATCH",
    &format!("/club-needs/{need_id}"),
    Some(club),
    Some(json!({ "status": "closed" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);

  let listed = json_body(call(&f.state, "GET", "/club-needs", Some(player), None).await).await;
  assert!(listed.as_array().unwrap().is_empty());

  let resp = call(&f.state, "DELETE", &format!("/club-needs/{need_id}"), Some(club), None).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  let resp = call(&f.state, "GET", &format!("/club-needs/{need_id}"), Some(club), None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_club_cannot_post_need() {
  let f = fixture();
  let coach = sign_in(&f.state, "coach").await;
  let resp = call(
    &f.state,
    "POST",
    "/club-needs",
    Some(coach),
    Some(json!({ "position": "Striker" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ── Favorites ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn favorites_round_trip() {
  let f = fixture();
  let scout = sign_in(&f.state, "scout").await;
  let uri = format!("/favorites/{}", f.player);

  let resp = call(&f.state, "PUT", &uri, Some(scout), None).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let resp = call(&f.state, "PUT", &uri, Some(scout), None).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);

  let listed = json_body(call(&f.state, "GET", "/favorites", Some(scout), None).await).await;
  assert_eq!(listed.as_array().unwrap().len(), 1);

  let resp = call(&f.state, "DELETE", &uri, Some(scout), None).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  let resp = call(&f.state, "DELETE", &uri, Some(scout), None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cannot_favorite_restricted_profile() {
  let f = fixture();
  let player = sign_in(&f.state, "player").await;
  let uri = format!("/favorites/{}", f.sponsor);

  let resp = call(&f.state, "GET", &format!("/profiles/{}", f.sponsor), Some(player), None).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);

  let resp = call(&f.state, "PUT", &uri, Some(player), None).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  let listed = json_body(call(&f.state, "GET", "/favorites", Some(player), None).await).await;
  assert!(listed.as_array().unwrap().is_empty());
}
