//! [`Session`] — per-session profile and request state over a [`KvStore`].
//!
//! A session owns the keys under `session:{id}:`. Club needs live under the
//! shared `club_need:` prefix so that open postings are visible to every
//! session; only the owning club may change them.
//!
//! Every value is JSON. A value that no longer decodes is logged and treated
//! as absent.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
  Error, Result,
  club_need::{ClubNeed, ClubNeedFilter, NeedStatus, NewClubNeed},
  contact::{ContactRequest, ContactState, NewContactRequest},
  permission::{self, can_perform_action},
  profile::Favorite,
  role::{Action, ProfileType, Role},
  route::{self, Route, RouteDecision},
  store::KvStore,
};

const CLUB_NEED_PREFIX: &str = "club_need:";

/// Snapshot of a session for the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
  pub session_id:                 Uuid,
  pub role:                       Option<Role>,
  pub onboarding_complete:        bool,
  pub contact_requests_sent:      u32,
  pub contact_requests_remaining: u32,
  /// Paths of the dashboard pages the role may reach.
  #[serde(default)]
  pub navigation:                 Vec<String>,
}

/// One browser session's view of the store.
///
/// Cloning is cheap: the backend is reference-counted.
pub struct Session<S> {
  store: Arc<S>,
  id:    Uuid,
}

impl<S> Clone for Session<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store), id: self.id } }
}

impl<S: KvStore> Session<S> {
  pub fn new(store: Arc<S>, id: Uuid) -> Self { Self { store, id } }

  pub fn id(&self) -> Uuid { self.id }

  // ── Encoding ──────────────────────────────────────────────────────────────

  fn key(&self, name: &str) -> String { format!("session:{}:{name}", self.id) }

  fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
      Ok(v) => Some(v),
      Err(e) => {
        warn!(key, error = %e, "discarding undecodable stored value");
        None
      }
    }
  }

  async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
    let raw = self.store.get(key).await.map_err(Error::store)?;
    Ok(raw.and_then(|raw| Self::decode(key, &raw)))
  }

  async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    self.store.set(key, raw).await.map_err(Error::store)
  }

  async fn require_role(&self) -> Result<Role> {
    self.stored_role().await?.ok_or(Error::NotAuthenticated)
  }

  // ── Role & onboarding ─────────────────────────────────────────────────────

  /// The role on record; `None` means unauthenticated or pre-onboarding.
  pub async fn stored_role(&self) -> Result<Option<Role>> {
    self.read(&self.key("role")).await
  }

  pub async fn set_role(&self, role: Role) -> Result<()> {
    self.write(&self.key("role"), &role).await?;
    info!(session = %self.id, %role, "role selected");
    Ok(())
  }

  pub async fn is_onboarding_complete(&self) -> Result<bool> {
    Ok(self.read(&self.key("onboarding_complete")).await?.unwrap_or(false))
  }

  /// Mark onboarding finished. A role must already be on record.
  pub async fn complete_onboarding(&self) -> Result<()> {
    let role = self.require_role().await?;
    self.write(&self.key("onboarding_complete"), &true).await?;
    info!(session = %self.id, %role, "onboarding complete");
    Ok(())
  }

  /// Forget the role and onboarding flag. The contact-request log and
  /// favorites stay with the session.
  pub async fn sign_out(&self) -> Result<()> {
    self.store.delete(&self.key("role")).await.map_err(Error::store)?;
    self
      .store
      .delete(&self.key("onboarding_complete"))
      .await
      .map_err(Error::store)?;
    info!(session = %self.id, "signed out");
    Ok(())
  }

  /// Where the session should go when it asks for `route`.
  pub async fn navigate(&self, route: Route) -> Result<RouteDecision> {
    let role = self.stored_role().await?;
    let onboarded = self.is_onboarding_complete().await?;
    Ok(route::guard(role, onboarded, route))
  }

  pub async fn summary(&self) -> Result<SessionSummary> {
    let role = self.stored_role().await?;
    let sent = self.contact_request_count().await?;
    Ok(SessionSummary {
      session_id:                 self.id,
      role,
      onboarding_complete:        self.is_onboarding_complete().await?,
      contact_requests_sent:      sent,
      contact_requests_remaining: permission::contact_request_limit(role)
        .saturating_sub(sent),
      navigation:                 role
        .map(|r| route::navigation(r).iter().map(Route::path).collect())
        .unwrap_or_default(),
    })
  }

  // ── Contact requests ──────────────────────────────────────────────────────

  pub async fn contact_requests(&self) -> Result<Vec<ContactRequest>> {
    Ok(self.read(&self.key("contact_requests")).await?.unwrap_or_default())
  }

  pub async fn contact_request_count(&self) -> Result<u32> {
    let n = self.contact_requests().await?.len();
    Ok(u32::try_from(n).unwrap_or(u32::MAX))
  }

  pub async fn has_contact_request_to(&self, target_id: Uuid) -> Result<bool> {
    Ok(
      self
        .contact_requests()
        .await?
        .iter()
        .any(|r| r.target_id == target_id),
    )
  }

  /// Quota left for the current role; zero when no role is on record.
  pub async fn remaining_contact_requests(&self) -> Result<u32> {
    let role = self.stored_role().await?;
    let sent = self.contact_request_count().await?;
    Ok(permission::contact_request_limit(role).saturating_sub(sent))
  }

  /// The state the contact affordance for `target_id` should render in.
  pub async fn contact_state(
    &self,
    target_id: Uuid,
    target_type: ProfileType,
  ) -> Result<ContactState> {
    let role = self.stored_role().await?;
    if !permission::can_contact(role, target_type) {
      return Ok(ContactState::NotPermitted);
    }
    if self.has_contact_request_to(target_id).await? {
      return Ok(ContactState::AlreadySent);
    }
    match self.remaining_contact_requests().await? {
      0 => Ok(ContactState::QuotaExhausted),
      remaining => Ok(ContactState::Available { remaining }),
    }
  }

  /// Append a request to the log.
  ///
  /// Rejected without touching the log when no role is on record, the role
  /// cannot contact `target_type`, a request to the same target exists, or
  /// the quota is used up.
  pub async fn send_contact_request(
    &self,
    input: NewContactRequest,
  ) -> Result<ContactRequest> {
    let role = self.require_role().await?;
    let row = permission::permissions(role);

    if !row.allows(Action::SendContactRequest)
      && !row.allows(Action::SendCooperationRequest)
    {
      return Err(Error::ActionNotPermitted {
        role,
        action: Action::SendContactRequest,
      });
    }
    if !row.can_view(input.target_type) {
      return Err(Error::ProfileTypeRestricted { role, target: input.target_type });
    }

    let mut log = self.contact_requests().await?;
    if log.iter().any(|r| r.target_id == input.target_id) {
      return Err(Error::DuplicateContactRequest(input.target_id));
    }
    if log.len() >= row.contact_request_limit as usize {
      return Err(Error::QuotaExhausted { limit: row.contact_request_limit });
    }

    let request = ContactRequest {
      target_id:   input.target_id,
      target_name: input.target_name,
      target_type: input.target_type,
      message:     input.message,
      created_at:  Utc::now(),
    };
    log.push(request.clone());
    self.write(&self.key("contact_requests"), &log).await?;

    info!(
      session = %self.id,
      target = %request.target_id,
      sent = log.len(),
      limit = row.contact_request_limit,
      "contact request sent"
    );
    Ok(request)
  }

  // ── Club needs ────────────────────────────────────────────────────────────

  fn need_key(id: Uuid) -> String { format!("{CLUB_NEED_PREFIX}{id}") }

  /// A need is visible to its owner in any status and to everyone else while
  /// it is open.
  fn can_see(&self, need: &ClubNeed) -> bool {
    need.club_id == self.id || need.status == NeedStatus::Open
  }

  /// The need `id`, provided the session is still a club and owns it.
  async fn owned_need(&self, id: Uuid) -> Result<ClubNeed> {
    let role = self.require_role().await?;
    if !can_perform_action(role, Action::PostClubNeed) {
      return Err(Error::ActionNotPermitted { role, action: Action::PostClubNeed });
    }
    let need: ClubNeed = self
      .read(&Self::need_key(id))
      .await?
      .ok_or(Error::ClubNeedNotFound(id))?;
    if need.club_id != self.id {
      return Err(Error::NotNeedOwner(id));
    }
    Ok(need)
  }

  pub async fn create_club_need(&self, input: NewClubNeed) -> Result<ClubNeed> {
    let role = self.require_role().await?;
    if !can_perform_action(role, Action::PostClubNeed) {
      return Err(Error::ActionNotPermitted { role, action: Action::PostClubNeed });
    }
    if input.position.trim().is_empty() {
      return Err(Error::InvalidInput("position must not be empty".into()));
    }

    let now = Utc::now();
    let need = ClubNeed {
      id:          Uuid::new_v4(),
      club_id:     self.id,
      position:    input.position,
      urgency:     input.urgency,
      description: input.description,
      status:      NeedStatus::Open,
      created_at:  now,
      updated_at:  now,
    };
    self.write(&Self::need_key(need.id), &need).await?;

    info!(club = %self.id, need = %need.id, position = %need.position, "club need posted");
    Ok(need)
  }

  /// Needs matching `filter` that this session may see, newest first.
  pub async fn club_needs(&self, filter: ClubNeedFilter) -> Result<Vec<ClubNeed>> {
    let entries = self
      .store
      .list(CLUB_NEED_PREFIX)
      .await
      .map_err(Error::store)?;

    let mut needs: Vec<ClubNeed> = entries
      .iter()
      .filter_map(|(key, raw)| Self::decode::<ClubNeed>(key, raw))
      .filter(|n| self.can_see(n) && filter.matches(n))
      .collect();
    needs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    debug!(session = %self.id, count = needs.len(), "listed club needs");
    Ok(needs)
  }

  pub async fn club_need(&self, id: Uuid) -> Result<Option<ClubNeed>> {
    let need: Option<ClubNeed> = self.read(&Self::need_key(id)).await?;
    Ok(need.filter(|n| self.can_see(n)))
  }

  pub async fn update_club_need_status(
    &self,
    id: Uuid,
    status: NeedStatus,
  ) -> Result<ClubNeed> {
    let mut need = self.owned_need(id).await?;
    if !need.status.can_transition_to(status) {
      return Err(Error::InvalidTransition { from: need.status, to: status });
    }

    let from = need.status;
    need.status = status;
    need.updated_at = Utc::now();
    self.write(&Self::need_key(id), &need).await?;

    info!(club = %self.id, need = %id, %from, to = %status, "club need status changed");
    Ok(need)
  }

  pub async fn delete_club_need(&self, id: Uuid) -> Result<()> {
    self.owned_need(id).await?;
    self.store.delete(&Self::need_key(id)).await.map_err(Error::store)?;
    info!(club = %self.id, need = %id, "club need deleted");
    Ok(())
  }

  // ── Favorites ─────────────────────────────────────────────────────────────

  pub async fn favorites(&self) -> Result<Vec<Favorite>> {
    Ok(self.read(&self.key("favorites")).await?.unwrap_or_default())
  }

  pub async fn is_favorite(&self, profile_id: Uuid) -> Result<bool> {
    Ok(self.favorites().await?.iter().any(|f| f.profile_id == profile_id))
  }

  /// Bookmark a profile of type `profile_type`. The role must be allowed to
  /// view that type.
  pub async fn add_favorite(
    &self,
    profile_id: Uuid,
    profile_type: ProfileType,
  ) -> Result<Favorite> {
    let role = self.require_role().await?;
    if !can_perform_action(role, Action::SaveFavorites) {
      return Err(Error::ActionNotPermitted { role, action: Action::SaveFavorites });
    }
    if !permission::can_view_profile_type(role, profile_type) {
      return Err(Error::ProfileTypeRestricted { role, target: profile_type });
    }

    let mut favorites = self.favorites().await?;
    if favorites.iter().any(|f| f.profile_id == profile_id) {
      return Err(Error::DuplicateFavorite(profile_id));
    }
    let favorite = Favorite { profile_id, added_at: Utc::now() };
    favorites.push(favorite.clone());
    self.write(&self.key("favorites"), &favorites).await?;
    Ok(favorite)
  }

  /// Returns whether the profile was a favorite.
  pub async fn remove_favorite(&self, profile_id: Uuid) -> Result<bool> {
    let mut favorites = self.favorites().await?;
    let before = favorites.len();
    favorites.retain(|f| f.profile_id != profile_id);
    if favorites.len() == before {
      return Ok(false);
    }
    self.write(&self.key("favorites"), &favorites).await?;
    Ok(true)
  }
}
