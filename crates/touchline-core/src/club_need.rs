//! Club needs: open positions a club advertises.
//!
//! A need is created by a club, its status is changed only by that club, and
//! it is removed by explicit deletion. Open needs are readable by every role.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
  Low,
  #[default]
  Medium,
  High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedStatus {
  #[default]
  Open,
  Filled,
  Closed,
}

impl NeedStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Open => "open",
      Self::Filled => "filled",
      Self::Closed => "closed",
    }
  }

  /// `open → filled`, `open → closed`, and reopening from any status.
  pub fn can_transition_to(self, next: NeedStatus) -> bool {
    matches!(
      (self, next),
      (_, Self::Open) | (Self::Open, Self::Filled) | (Self::Open, Self::Closed)
    )
  }
}

impl fmt::Display for NeedStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.as_str())
  }
}

/// A club's posting for a position it wants to fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubNeed {
  pub id:          Uuid,
  /// The session id of the owning club.
  pub club_id:     Uuid,
  pub position:    String,
  pub urgency:     Urgency,
  pub description: String,
  pub status:      NeedStatus,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input to [`crate::Session::create_club_need`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewClubNeed {
  pub position:    String,
  #[serde(default)]
  pub urgency:     Urgency,
  #[serde(default)]
  pub description: String,
}

/// Listing filter for [`crate::Session::club_needs`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ClubNeedFilter {
  pub club_id: Option<Uuid>,
  pub status:  Option<NeedStatus>,
}

impl ClubNeedFilter {
  pub fn matches(&self, need: &ClubNeed) -> bool {
    self.club_id.is_none_or(|id| need.club_id == id)
      && self.status.is_none_or(|s| need.status == s)
  }
}
