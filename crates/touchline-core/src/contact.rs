//! Contact requests: the outbound log a session keeps of who it reached out
//! to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::ProfileType;

/// One outbound request. The log is append-only and holds at most one
/// request per `target_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
  pub target_id:   Uuid,
  pub target_name: String,
  pub target_type: ProfileType,
  pub message:     String,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::Session::send_contact_request`]. `created_at` is set by
/// the session.
#[derive(Debug, Clone, Deserialize)]
pub struct NewContactRequest {
  pub target_id:   Uuid,
  pub target_name: String,
  pub target_type: ProfileType,
  #[serde(default)]
  pub message:     String,
}

/// What the contact affordance on a profile should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ContactState {
  /// The viewer's role cannot contact this kind of profile.
  NotPermitted,
  /// A request to this target is already in the log.
  AlreadySent,
  /// No requests left in the viewer's quota.
  QuotaExhausted,
  Available { remaining: u32 },
}

impl ContactState {
  pub fn can_send(&self) -> bool { matches!(self, Self::Available { .. }) }
}
