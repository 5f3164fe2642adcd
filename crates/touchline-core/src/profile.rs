//! Directory profiles and permission-gated profile viewing.
//!
//! The directory is read-only seed data. Whether a viewer may see an entry is
//! decided by [`crate::permission::can_view_profile_type`]; the outcome is a
//! view state, not an error.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  permission::can_view_profile_type,
  role::{ProfileType, Role},
};

/// One entry in the discover directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub id:           Uuid,
  pub display_name: String,
  pub profile_type: ProfileType,
  pub headline:     Option<String>,
  pub location:     Option<String>,
  /// Current club, for players and coaches.
  pub club:         Option<String>,
  /// Playing position, for players.
  pub position:     Option<String>,
}

/// A profile a session has bookmarked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
  pub profile_id: Uuid,
  pub added_at:   DateTime<Utc>,
}

/// Result of looking up a profile on behalf of a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum ProfileAccess {
  Visible { profile: Profile },
  NotFound,
  /// The profile exists but the viewer's role may not see its type.
  Restricted { profile_type: ProfileType },
}

// ─── Directory ───────────────────────────────────────────────────────────────

/// The in-memory set of profiles the dashboard can browse.
#[derive(Debug, Clone, Default)]
pub struct Directory {
  profiles: Vec<Profile>,
}

impl Directory {
  pub fn new(profiles: Vec<Profile>) -> Self { Self { profiles } }

  /// Parse a JSON array of profiles.
  pub fn from_json(json: &str) -> Result<Self> {
    Ok(Self::new(serde_json::from_str(json)?))
  }

  /// Read a JSON seed file from disk.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let raw = std::fs::read_to_string(path)?;
    Self::from_json(&raw)
  }

  pub fn get(&self, id: Uuid) -> Option<&Profile> {
    self.profiles.iter().find(|p| p.id == id)
  }

  pub fn len(&self) -> usize { self.profiles.len() }

  pub fn is_empty(&self) -> bool { self.profiles.is_empty() }

  /// Resolve `id` for `viewer`.
  pub fn view(&self, viewer: Option<Role>, id: Uuid) -> ProfileAccess {
    match self.get(id) {
      None => ProfileAccess::NotFound,
      Some(p) if !can_view_profile_type(viewer, p.profile_type) => {
        ProfileAccess::Restricted { profile_type: p.profile_type }
      }
      Some(p) => ProfileAccess::Visible { profile: p.clone() },
    }
  }

  /// Every profile `viewer` may see, optionally narrowed to one type.
  pub fn discover(
    &self,
    viewer: Option<Role>,
    profile_type: Option<ProfileType>,
  ) -> Vec<Profile> {
    self
      .profiles
      .iter()
      .filter(|p| can_view_profile_type(viewer, p.profile_type))
      .filter(|p| profile_type.is_none_or(|t| p.profile_type == t))
      .cloned()
      .collect()
  }
}
