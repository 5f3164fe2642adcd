//! Async HTTP client wrapping the touchline JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::time::Duration;
use touchline_core::{
  ProfileType, Role,
  club_need::{ClubNeed, NeedStatus, Urgency},
  contact::{ContactRequest, ContactState},
  profile::{Profile, ProfileAccess},
  session::SessionSummary,
};
use uuid::Uuid;

/// Connection settings for the touchline API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub session:  Uuid,
}

/// Body of `GET /api/navigation`.
#[derive(Debug, Deserialize)]
pub struct Navigation {
  pub allowed:  bool,
  pub redirect: Option<String>,
}

/// Body of `GET /api/contact-requests/{target_id}`.
#[derive(Debug, Deserialize)]
pub struct TargetState {
  pub sent:  bool,
  pub state: Option<ContactState>,
}

/// Async HTTP client for the touchline JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn session(&self, req: RequestBuilder) -> RequestBuilder {
    req.header("x-session-id", self.config.session.to_string())
  }

  /// Send `req`, turning non-2xx responses into errors carrying the server's
  /// message.
  async fn send(&self, req: RequestBuilder, what: &str) -> Result<Response> {
    let resp = self
      .session(req)
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;

    if resp.status().is_success() {
      return Ok(resp);
    }
    let status = resp.status();
    let message = resp
      .json::<Value>()
      .await
      .ok()
      .and_then(|v| v["error"].as_str().map(str::to_owned))
      .unwrap_or_default();
    Err(anyhow!("{what} → {status}: {message}"))
  }

  async fn json<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T> {
    self
      .send(req, what)
      .await?
      .json()
      .await
      .with_context(|| format!("deserialising {what} response"))
  }

  // ── Session ───────────────────────────────────────────────────────────────

  /// `GET /api/session`
  pub async fn summary(&self) -> Result<SessionSummary> {
    self.json(self.client.get(self.url("/session")), "GET /session").await
  }

  /// `PUT /api/session/role`
  pub async fn set_role(&self, role: Role) -> Result<SessionSummary> {
    let req = self.client.put(self.url("/session/role")).json(&json!({ "role": role }));
    self.json(req, "PUT /session/role").await
  }

  /// `POST /api/session/onboarding`
  pub async fn complete_onboarding(&self) -> Result<SessionSummary> {
    let req = self.client.post(self.url("/session/onboarding"));
    self.json(req, "POST /session/onboarding").await
  }

  /// `DELETE /api/session`
  pub async fn sign_out(&self) -> Result<()> {
    self
      .send(self.client.delete(self.url("/session")), "DELETE /session")
      .await?;
    Ok(())
  }

  /// `GET /api/navigation?path=<path>`
  pub async fn navigate(&self, path: &str) -> Result<Navigation> {
    let req = self.client.get(self.url("/navigation")).query(&[("path", path)]);
    self.json(req, "GET /navigation").await
  }

  /// `GET /api/permissions/{role}`
  pub async fn permissions(&self, role: &str) -> Result<Value> {
    let req = self.client.get(self.url(&format!("/permissions/{role}")));
    self.json(req, "GET /permissions").await
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  /// `GET /api/profiles/{id}`. Restricted and missing profiles are states,
  /// not errors.
  pub async fn profile(&self, id: Uuid) -> Result<ProfileAccess> {
    let resp = self
      .session(self.client.get(self.url(&format!("/profiles/{id}"))))
      .send()
      .await
      .with_context(|| format!("GET /profiles/{id} failed"))?;

    match resp.status() {
      StatusCode::OK | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
        resp.json().await.context("deserialising profile access")
      }
      status => Err(anyhow!("GET /profiles/{id} → {status}")),
    }
  }

  /// `GET /api/profiles[?type=<type>]`
  pub async fn discover(&self, profile_type: Option<ProfileType>) -> Result<Vec<Profile>> {
    let mut req = self.client.get(self.url("/profiles"));
    if let Some(t) = profile_type {
      req = req.query(&[("type", t.as_str())]);
    }
    self.json(req, "GET /profiles").await
  }

  // ── Contact requests ──────────────────────────────────────────────────────

  /// `POST /api/contact-requests`
  pub async fn contact(&self, target_id: Uuid, message: &str) -> Result<ContactRequest> {
    let req = self
      .client
      .post(self.url("/contact-requests"))
      .json(&json!({ "target_id": target_id, "message": message }));
    self.json(req, "POST /contact-requests").await
  }

  /// `GET /api/contact-requests/{target_id}`
  pub async fn target_state(&self, target_id: Uuid) -> Result<TargetState> {
    let req = self.client.get(self.url(&format!("/contact-requests/{target_id}")));
    self.json(req, "GET /contact-requests/{target_id}").await
  }

  /// `GET /api/contact-requests`
  pub async fn contact_requests(&self) -> Result<Vec<ContactRequest>> {
    let req = self.client.get(self.url("/contact-requests"));
    self.json(req, "GET /contact-requests").await
  }

  // ── Club needs ────────────────────────────────────────────────────────────

  /// `GET /api/club-needs[?club_id=..][&status=..]`
  pub async fn club_needs(
    &self,
    club_id: Option<Uuid>,
    status: Option<NeedStatus>,
  ) -> Result<Vec<ClubNeed>> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(id) = club_id {
      query.push(("club_id", id.to_string()));
    }
    if let Some(s) = status {
      query.push(("status", s.to_string()));
    }
    let req = self.client.get(self.url("/club-needs")).query(&query);
    self.json(req, "GET /club-needs").await
  }

  /// `POST /api/club-needs`
  pub async fn post_need(
    &self,
    position: &str,
    urgency: Urgency,
    description: &str,
  ) -> Result<ClubNeed> {
    let req = self.client.post(self.url("/club-needs")).json(&json!({
      "position": position,
      "urgency": urgency,
      "description": description,
    }));
    self.json(req, "POST /club-needs").await
  }

  /// `PATCH /api/club-needs/{id}`
  pub async fn set_need_status(&self, id: Uuid, status: NeedStatus) -> Result<ClubNeed> {
    let req = self
      .client
      .patch(self.url(&format!("/club-needs/{id}")))
      .json(&json!({ "status": status }));
    self.json(req, "PATCH /club-needs/{id}").await
  }

  /// `DELETE /api/club-needs/{id}`
  pub async fn delete_need(&self, id: Uuid) -> Result<()> {
    let req = self.client.delete(self.url(&format!("/club-needs/{id}")));
    self.send(req, "DELETE /club-needs/{id}").await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn profile_error_names_the_profile() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://127.0.0.1:1".into(),
      session:  Uuid::new_v4(),
    })
    .unwrap();
    let id = Uuid::new_v4();
    let err = client.profile(id).await.unwrap_err();
    assert_eq!(err.to_string(), format!("GET /profiles/{id} failed"));
  }

  #[test]
  fn url_joins_api_prefix() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:5240/".into(),
      session:  Uuid::new_v4(),
    })
    .unwrap();
    assert_eq!(client.url("/session"), "http://localhost:5240/api/session");
  }
}
