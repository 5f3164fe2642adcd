//! The `x-session-id` extractor and handlers for session state.
//!
//! | Method   | Path                  | Notes |
//! |----------|-----------------------|-------|
//! | `GET`    | `/session`            | [`SessionSummary`] |
//! | `PUT`    | `/session/role`       | Body: `{"role":"scout"}` |
//! | `POST`   | `/session/onboarding` | Marks onboarding complete |
//! | `DELETE` | `/session`            | Sign out |
//! | `GET`    | `/navigation`         | `?path=/dashboard/jobs` |

use axum::{
  extract::{FromRequestParts, State},
  http::{StatusCode, request::Parts},
};
use serde::{Deserialize, Serialize};
use touchline_core::{
  Role,
  route::{Route, RouteDecision},
  session::SessionSummary,
  store::KvStore,
};
use uuid::Uuid;

use crate::{
  ApiState,
  error::ApiError,
  extract::{Json, Query},
};

pub const SESSION_HEADER: &str = "x-session-id";

// ─── Extractor ────────────────────────────────────────────────────────────────

/// The session a request acts for, read from the `x-session-id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

impl<St: Send + Sync> FromRequestParts<St> for SessionId {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &St,
  ) -> Result<Self, Self::Rejection> {
    let raw = parts
      .headers
      .get(SESSION_HEADER)
      .ok_or_else(|| ApiError::Unauthorized(format!("missing {SESSION_HEADER} header")))?
      .to_str()
      .map_err(|_| ApiError::BadRequest(format!("{SESSION_HEADER} is not ASCII")))?;

    Uuid::parse_str(raw.trim())
      .map(SessionId)
      .map_err(|e| ApiError::BadRequest(format!("{SESSION_HEADER}: {e}")))
  }
}

// ─── Summary ──────────────────────────────────────────────────────────────────

/// `GET /session`
pub async fn summary<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
) -> Result<Json<SessionSummary>, ApiError> {
  Ok(Json(state.session(id).summary().await?))
}

// ─── Role ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RoleBody {
  pub role: Role,
}

/// `PUT /session/role` — body: `{"role":"coach"}`
pub async fn set_role<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Json(body): Json<RoleBody>,
) -> Result<Json<SessionSummary>, ApiError> {
  let session = state.session(id);
  session.set_role(body.role).await?;
  Ok(Json(session.summary().await?))
}

/// `POST /session/onboarding`
pub async fn complete_onboarding<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
) -> Result<Json<SessionSummary>, ApiError> {
  let session = state.session(id);
  session.complete_onboarding().await?;
  Ok(Json(session.summary().await?))
}

/// `DELETE /session`
pub async fn sign_out<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
) -> Result<StatusCode, ApiError> {
  state.session(id).sign_out().await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Navigation ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NavigationParams {
  pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NavigationResponse {
  pub allowed:  bool,
  /// Where to send the session instead, when not allowed.
  pub redirect: Option<String>,
}

/// `GET /navigation?path=<path>` — 404 if the path is not a known route.
pub async fn navigation<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Query(params): Query<NavigationParams>,
) -> Result<Json<NavigationResponse>, ApiError> {
  let route = Route::parse(&params.path)
    .ok_or_else(|| ApiError::NotFound(format!("unknown route {}", params.path)))?;

  let decision = state.session(id).navigate(route).await?;
  Ok(Json(match decision {
    RouteDecision::Allow => NavigationResponse { allowed: true, redirect: None },
    RouteDecision::Redirect(to) => NavigationResponse {
      allowed:  false,
      redirect: Some(to.path()),
    },
  }))
}
