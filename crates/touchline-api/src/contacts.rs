//! Handlers for `/contact-requests` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contact-requests` | The session's sent log |
//! | `POST` | `/contact-requests` | Body: [`SendBody`]; returns 201 + request |
//! | `GET`  | `/contact-requests/{target_id}` | [`TargetState`] for any target id |

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use touchline_core::{
  ProfileType,
  contact::{ContactRequest, ContactState, NewContactRequest},
  store::KvStore,
};
use uuid::Uuid;

use crate::{
  ApiState, SessionId,
  error::ApiError,
  extract::{Json, Path},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contact-requests`
pub async fn list<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
) -> Result<Json<Vec<ContactRequest>>, ApiError> {
  Ok(Json(state.session(id).contact_requests().await?))
}

// ─── Send ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /contact-requests`.
///
/// When `target_id` is a directory profile its name and type are taken from
/// the directory; otherwise both must be supplied.
#[derive(Debug, Deserialize)]
pub struct SendBody {
  pub target_id:   Uuid,
  pub target_name: Option<String>,
  pub target_type: Option<ProfileType>,
  #[serde(default)]
  pub message:     String,
}

/// `POST /contact-requests` — returns 201 + the stored [`ContactRequest`].
pub async fn send<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Json(body): Json<SendBody>,
) -> Result<impl IntoResponse, ApiError> {
  let (target_name, target_type) = match state.directory.get(body.target_id) {
    Some(p) => (p.display_name.clone(), p.profile_type),
    None => match (body.target_name, body.target_type) {
      (Some(name), Some(t)) => (name, t),
      _ => {
        return Err(ApiError::BadRequest(format!(
          "{} is not in the directory; target_name and target_type are required",
          body.target_id
        )));
      }
    },
  };

  let request = state
    .session(id)
    .send_contact_request(NewContactRequest {
      target_id: body.target_id,
      target_name,
      target_type,
      message: body.message,
    })
    .await?;
  Ok((StatusCode::CREATED, Json(request)))
}

// ─── Per-target state ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct TargetState {
  pub sent:     bool,
  /// `None` when the target is neither in the directory nor in the log, so
  /// its profile type is unknown.
  pub state:    Option<ContactState>,
  pub can_send: bool,
}

/// `GET /contact-requests/{target_id}`
pub async fn target_state<S: KvStore + 'static>(
  State(state): State<ApiState<S>>,
  id: SessionId,
  Path(target_id): Path<Uuid>,
) -> Result<Json<TargetState>, ApiError> {
  let session = state.session(id);
  let logged = session
    .contact_requests()
    .await?
    .into_iter()
    .find(|r| r.target_id == target_id);

  let target_type = state
    .directory
    .get(target_id)
    .map(|p| p.profile_type)
    .or(logged.as_ref().map(|r| r.target_type));
  let contact = match target_type {
    Some(t) => Some(session.contact_state(target_id, t).await?),
    None => None,
  };

  Ok(Json(TargetState {
    sent:     session.has_contact_request_to(target_id).await?,
    can_send: contact.is_some_and(|c| c.can_send()),
    state:    contact,
  }))
}
