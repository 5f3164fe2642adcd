//! Handlers for `/favorites` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/favorites` | The session's bookmarks |
//! | `PUT`    | `/favorites/{profile_id}` | 201; 404 if not a directory profile, 403 if restricted |
//! | `DELETE` | `/favorites/{profile_id}` | 204; 404 if not a favorite |

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use touchline_core::{profile::Favorite, store::KvStore};
use uuid::Uuid;

use crate::{
  ApiState, SessionId,
  error::ApiError,
  extract::{Json, Path},
};

/// `GET /favorites`
pub async fn list<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
) -> Result<Json<Vec<Favorite>>, ApiError> {
  Ok(Json(state.session(id).favorites().await?))
}

/// `PUT /favorites/{profile_id}`
pub async fn add<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  let profile_type = state
    .directory
    .get(profile_id)
    .map(|p| p.profile_type)
    .ok_or_else(|| ApiError::NotFound(format!("profile {profile_id} not found")))?;
  let favorite = state.session(id).add_favorite(profile_id, profile_type).await?;
  Ok((StatusCode::CREATED, Json(favorite)))
}

/// `DELETE /favorites/{profile_id}`
pub async fn remove<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Path(profile_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  if state.session(id).remove_favorite(profile_id).await? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("profile {profile_id} is not a favorite")))
  }
}
