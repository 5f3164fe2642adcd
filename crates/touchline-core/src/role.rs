//! Actor roles, directory profile types, and the actions a role may take.
//!
//! The role set is closed and known at build time, so every lookup keyed on
//! it is a plain `match`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

// ─── Role ────────────────────────────────────────────────────────────────────

/// The kind of account driving a session. Determines both the navigation
/// surface and the permission row used for gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Player,
  Coach,
  Club,
  Scout,
  Sponsor,
}

impl Role {
  pub const ALL: [Role; 5] =
    [Self::Player, Self::Coach, Self::Club, Self::Scout, Self::Sponsor];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Player => "player",
      Self::Coach => "coach",
      Self::Club => "club",
      Self::Scout => "scout",
      Self::Sponsor => "sponsor",
    }
  }

  /// The directory profile type an account of this role is listed under.
  pub fn profile_type(self) -> ProfileType {
    match self {
      Self::Player => ProfileType::Player,
      Self::Coach => ProfileType::Coach,
      Self::Club => ProfileType::Club,
      Self::Scout => ProfileType::Scout,
      Self::Sponsor => ProfileType::SponsorCompany,
    }
  }

  /// Parse a role name, treating anything unrecognised as "no role".
  pub fn parse_lossy(s: &str) -> Option<Self> { s.parse().ok() }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.as_str())
  }
}

impl FromStr for Role {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "player" => Ok(Self::Player),
      "coach" => Ok(Self::Coach),
      "club" => Ok(Self::Club),
      "scout" => Ok(Self::Scout),
      "sponsor" => Ok(Self::Sponsor),
      _ => Err(crate::Error::UnknownRole(s.to_owned())),
    }
  }
}

// ─── ProfileType ─────────────────────────────────────────────────────────────

/// The kind of entity a directory entry represents; the target of a
/// visibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileType {
  Player,
  Coach,
  Club,
  Scout,
  SponsorCompany,
}

impl ProfileType {
  pub const ALL: [ProfileType; 5] = [
    Self::Player,
    Self::Coach,
    Self::Club,
    Self::Scout,
    Self::SponsorCompany,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Player => "player",
      Self::Coach => "coach",
      Self::Club => "club",
      Self::Scout => "scout",
      Self::SponsorCompany => "sponsor-company",
    }
  }
}

impl fmt::Display for ProfileType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.as_str())
  }
}

impl FromStr for ProfileType {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ProfileType::ALL
      .into_iter()
      .find(|t| t.as_str() == s)
      .ok_or_else(|| crate::Error::UnknownProfileType(s.to_owned()))
  }
}

// ─── Action ──────────────────────────────────────────────────────────────────

/// A gated operation. Names match the permission identifiers used by the
/// dashboard (`send_contact_request`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
  SendContactRequest,
  SendCooperationRequest,
  PostClubNeed,
  ApplyToClubNeed,
  ReviewApplicants,
  SaveFavorites,
}

impl Action {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::SendContactRequest => "send_contact_request",
      Self::SendCooperationRequest => "send_cooperation_request",
      Self::PostClubNeed => "post_club_need",
      Self::ApplyToClubNeed => "apply_to_club_need",
      Self::ReviewApplicants => "review_applicants",
      Self::SaveFavorites => "save_favorites",
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.as_str())
  }
}
