//! Error types for `touchline-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::{
  club_need::NeedStatus,
  role::{Action, ProfileType, Role},
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("no role on record for this session")]
  NotAuthenticated,

  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  #[error("unknown profile type: {0:?}")]
  UnknownProfileType(String),

  #[error("role {role} may not {action}")]
  ActionNotPermitted { role: Role, action: Action },

  #[error("role {role} may not view {target} profiles")]
  ProfileTypeRestricted { role: Role, target: ProfileType },

  #[error("contact request quota of {limit} exhausted")]
  QuotaExhausted { limit: u32 },

  #[error("a contact request to {0} was already sent")]
  DuplicateContactRequest(Uuid),

  #[error("club need not found: {0}")]
  ClubNeedNotFound(Uuid),

  #[error("club need {0} belongs to another club")]
  NotNeedOwner(Uuid),

  #[error("cannot move a club need from {from} to {to}")]
  InvalidTransition { from: NeedStatus, to: NeedStatus },

  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("profile {0} is already a favorite")]
  DuplicateFavorite(Uuid),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
