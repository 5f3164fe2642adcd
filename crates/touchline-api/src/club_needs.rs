//! Handlers for `/club-needs` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/club-needs` | Optional `?club_id=&status=` |
//! | `POST`   | `/club-needs` | Body: [`NewClubNeed`]; clubs only; returns 201 |
//! | `GET`    | `/club-needs/{id}` | 404 if missing or not visible |
//! | `PATCH`  | `/club-needs/{id}` | Body: `{"status":"filled"}`; owner only |
//! | `DELETE` | `/club-needs/{id}` | Owner only; returns 204 |

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use touchline_core::{
  club_need::{ClubNeed, ClubNeedFilter, NeedStatus, NewClubNeed},
  store::KvStore,
};
use uuid::Uuid;

use crate::{
  ApiState, SessionId,
  error::ApiError,
  extract::{Json, Path, Query},
};

/// `GET /club-needs[?club_id=<id>][&status=<status>]`
pub async fn list<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Query(filter): Query<ClubNeedFilter>,
) -> Result<Json<Vec<ClubNeed>>, ApiError> {
  Ok(Json(state.session(id).club_needs(filter).await?))
}

/// `POST /club-needs`
pub async fn create<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Json(body): Json<NewClubNeed>,
) -> Result<impl IntoResponse, ApiError> {
  let need = state.session(id).create_club_need(body).await?;
  Ok((StatusCode::CREATED, Json(need)))
}

/// `GET /club-needs/{id}`
pub async fn get_one<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Path(need_id): Path<Uuid>,
) -> Result<Json<ClubNeed>, ApiError> {
  let need = state
    .session(id)
    .club_need(need_id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("club need {need_id} not found")))?;
  Ok(Json(need))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: NeedStatus,
}

/// `PATCH /club-needs/{id}` — body: `{"status":"open"|"filled"|"closed"}`
pub async fn update_status<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Path(need_id): Path<Uuid>,
  Json(body): Json<StatusBody>,
) -> Result<Json<ClubNeed>, ApiError> {
  let need = state
    .session(id)
    .update_club_need_status(need_id, body.status)
    .await?;
  Ok(Json(need))
}

/// `DELETE /club-needs/{id}`
pub async fn delete_one<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Path(need_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  state.session(id).delete_club_need(need_id).await?;
  Ok(StatusCode::NO_CONTENT)
}
