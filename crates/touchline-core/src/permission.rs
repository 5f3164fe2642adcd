//! The fixed role → permission table.
//!
//! Every lookup accepts `impl Into<Option<Role>>` so callers holding a role
//! that failed to resolve can pass `None` and get the empty row: nothing
//! viewable, no actions, a quota of zero.

use serde::Serialize;

use crate::role::{Action, ProfileType, Role};

/// What one role is allowed to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRow {
  pub actions:               &'static [Action],
  pub viewable:              &'static [ProfileType],
  /// Ceiling on the total number of contact requests a session may send.
  pub contact_request_limit: u32,
}

impl PermissionRow {
  /// The deny-everything row used when no role is on record.
  pub const NONE: PermissionRow = PermissionRow {
    actions:               &[],
    viewable:              &[],
    contact_request_limit: 0,
  };

  pub fn allows(&self, action: Action) -> bool { self.actions.contains(&action) }

  pub fn can_view(&self, target: ProfileType) -> bool {
    self.viewable.contains(&target)
  }
}

// ─── Table ───────────────────────────────────────────────────────────────────

const PLAYER: PermissionRow = PermissionRow {
  actions:               &[Action::ApplyToClubNeed, Action::SaveFavorites],
  viewable:              &[ProfileType::Player, ProfileType::Coach, ProfileType::Club],
  contact_request_limit: 0,
};

const COACH: PermissionRow = PermissionRow {
  actions:               &[
    Action::SendContactRequest,
    Action::ApplyToClubNeed,
    Action::SaveFavorites,
  ],
  viewable:              &[ProfileType::Player, ProfileType::Coach, ProfileType::Club],
  contact_request_limit: 10,
};

const CLUB: PermissionRow = PermissionRow {
  actions:               &[
    Action::SendContactRequest,
    Action::SendCooperationRequest,
    Action::PostClubNeed,
    Action::ReviewApplicants,
    Action::SaveFavorites,
  ],
  viewable:              &ProfileType::ALL,
  contact_request_limit: 20,
};

const SCOUT: PermissionRow = PermissionRow {
  actions:               &[Action::SendContactRequest, Action::SaveFavorites],
  viewable:              &[ProfileType::Player, ProfileType::Coach, ProfileType::Club],
  contact_request_limit: 5,
};

const SPONSOR: PermissionRow = PermissionRow {
  actions:               &[Action::SendCooperationRequest, Action::SaveFavorites],
  viewable:              &[
    ProfileType::Player,
    ProfileType::Club,
    ProfileType::SponsorCompany,
  ],
  contact_request_limit: 10,
};

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// The permission row for `role`, or [`PermissionRow::NONE`].
pub fn permissions(role: impl Into<Option<Role>>) -> &'static PermissionRow {
  match role.into() {
    Some(Role::Player) => &PLAYER,
    Some(Role::Coach) => &COACH,
    Some(Role::Club) => &CLUB,
    Some(Role::Scout) => &SCOUT,
    Some(Role::Sponsor) => &SPONSOR,
    None => &PermissionRow::NONE,
  }
}

pub fn can_view_profile_type(
  role: impl Into<Option<Role>>,
  target: ProfileType,
) -> bool {
  permissions(role).can_view(target)
}

pub fn can_perform_action(role: impl Into<Option<Role>>, action: Action) -> bool {
  permissions(role).allows(action)
}

pub fn contact_request_limit(role: impl Into<Option<Role>>) -> u32 {
  permissions(role).contact_request_limit
}

/// Whether `role` may reach out to a profile of type `target` at all: it
/// needs a contact or cooperation action and must be able to see the target.
pub fn can_contact(role: impl Into<Option<Role>>, target: ProfileType) -> bool {
  let row = permissions(role);
  (row.allows(Action::SendContactRequest)
    || row.allows(Action::SendCooperationRequest))
    && row.can_view(target)
}
