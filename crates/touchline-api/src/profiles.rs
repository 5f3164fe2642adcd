//! Handlers for `/profiles` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/profiles` | Optional `?type=player\|coach\|club\|scout\|sponsor-company` |
//! | `GET`  | `/profiles/{id}` | 200 visible, 403 restricted, 404 not found |
//!
//! Both read the viewer's role from the session; a session without a role
//! sees nothing.

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use touchline_core::{
  ProfileType,
  profile::{Profile, ProfileAccess},
  store::KvStore,
};
use uuid::Uuid;

use crate::{
  ApiState, SessionId,
  error::ApiError,
  extract::{Json, Path, Query},
};

#[derive(Debug, Deserialize)]
pub struct DiscoverParams {
  #[serde(rename = "type")]
  pub profile_type: Option<ProfileType>,
}

/// `GET /profiles[?type=<type>]`
pub async fn discover<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Query(params): Query<DiscoverParams>,
) -> Result<Json<Vec<Profile>>, ApiError> {
  let role = state.session(id).stored_role().await?;
  Ok(Json(state.directory.discover(role, params.profile_type)))
}

/// `GET /profiles/{id}`. The body is always a [`ProfileAccess`], so the
/// page can render "not found" and "access restricted" states directly.
pub async fn get_one<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  let role = state.session(id).stored_role().await?;
  let access = state.directory.view(role, profile_id);
  let status = match access {
    ProfileAccess::Visible { .. } => StatusCode::OK,
    ProfileAccess::NotFound => StatusCode::NOT_FOUND,
    ProfileAccess::Restricted { .. } => StatusCode::FORBIDDEN,
  };
  Ok((status, Json(access)))
}
