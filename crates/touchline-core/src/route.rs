//! The navigable surface of the dashboard and the per-role allow-list that
//! gates it.
//!
//! [`guard`] folds session state (role, onboarding flag) and a requested
//! route into a [`RouteDecision`]: either the route is allowed or the caller
//! should redirect somewhere else.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

// ─── Route ───────────────────────────────────────────────────────────────────

/// Every path the front-end can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", content = "param", rename_all = "snake_case")]
pub enum Route {
  Login,
  Register,
  RegisterRole,
  ForgotPassword,
  Onboarding,
  OnboardingFor(Role),
  Dashboard,
  DashboardFor(Role),
  Discover,
  Jobs,
  ClubJobs,
  ClubApplicants,
  Messages,
  Favorites,
  Profile(Uuid),
}

impl Route {
  /// Parse a URL path. Trailing slashes are ignored; unknown paths, unknown
  /// roles and malformed profile ids yield `None`.
  pub fn parse(path: &str) -> Option<Self> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> =
      path.split('/').filter(|s| !s.is_empty()).collect();

    let route = match segments.as_slice() {
      ["login"] => Self::Login,
      ["register"] => Self::Register,
      ["register", "role"] => Self::RegisterRole,
      ["forgot-password"] => Self::ForgotPassword,
      ["onboarding"] => Self::Onboarding,
      ["onboarding", role] => Self::OnboardingFor(Role::parse_lossy(role)?),
      ["dashboard"] => Self::Dashboard,
      ["dashboard", "discover"] => Self::Discover,
      ["dashboard", "jobs"] => Self::Jobs,
      ["dashboard", "club", "jobs"] => Self::ClubJobs,
      ["dashboard", "club", "applicants"] => Self::ClubApplicants,
      ["dashboard", "messages"] => Self::Messages,
      ["dashboard", "favorites"] => Self::Favorites,
      ["dashboard", "profile", id] => Self::Profile(Uuid::parse_str(id).ok()?),
      ["dashboard", role] => Self::DashboardFor(Role::parse_lossy(role)?),
      _ => return None,
    };
    Some(route)
  }

  pub fn path(&self) -> String {
    match self {
      Self::Login => "/login".into(),
      Self::Register => "/register".into(),
      Self::RegisterRole => "/register/role".into(),
      Self::ForgotPassword => "/forgot-password".into(),
      Self::Onboarding => "/onboarding".into(),
      Self::OnboardingFor(role) => format!("/onboarding/{role}"),
      Self::Dashboard => "/dashboard".into(),
      Self::DashboardFor(role) => format!("/dashboard/{role}"),
      Self::Discover => "/dashboard/discover".into(),
      Self::Jobs => "/dashboard/jobs".into(),
      Self::ClubJobs => "/dashboard/club/jobs".into(),
      Self::ClubApplicants => "/dashboard/club/applicants".into(),
      Self::Messages => "/dashboard/messages".into(),
      Self::Favorites => "/dashboard/favorites".into(),
      Self::Profile(id) => format!("/dashboard/profile/{id}"),
    }
  }

  /// Reachable without a role on record.
  pub fn is_public(&self) -> bool {
    matches!(
      self,
      Self::Login | Self::Register | Self::RegisterRole | Self::ForgotPassword
    )
  }

  pub fn is_onboarding(&self) -> bool {
    matches!(self, Self::Onboarding | Self::OnboardingFor(_))
  }

  pub fn is_dashboard(&self) -> bool {
    !self.is_public() && !self.is_onboarding()
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.path())
  }
}

// ─── Allow-list ──────────────────────────────────────────────────────────────

/// Whether `role` may reach `route` at all, ignoring onboarding state.
pub fn can_navigate(role: impl Into<Option<Role>>, route: Route) -> bool {
  if route.is_public() {
    return true;
  }
  let Some(role) = role.into() else {
    return false;
  };

  match route {
    Route::OnboardingFor(r) | Route::DashboardFor(r) => r == role,
    Route::Jobs => matches!(role, Role::Player | Role::Coach),
    Route::ClubJobs | Route::ClubApplicants => role == Role::Club,
    Route::Onboarding
    | Route::Dashboard
    | Route::Discover
    | Route::Messages
    | Route::Favorites
    | Route::Profile(_)
    | Route::Login
    | Route::Register
    | Route::RegisterRole
    | Route::ForgotPassword => true,
  }
}

/// The static, parameter-free routes `role` may reach; the dashboard shell
/// builds its navigation from this.
pub fn navigation(role: Role) -> Vec<Route> {
  [
    Route::DashboardFor(role),
    Route::Discover,
    Route::Jobs,
    Route::ClubJobs,
    Route::ClubApplicants,
    Route::Messages,
    Route::Favorites,
  ]
  .into_iter()
  .filter(|r| can_navigate(role, *r))
  .collect()
}

// ─── Guard ───────────────────────────────────────────────────────────────────

/// Outcome of [`guard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum RouteDecision {
  Allow,
  Redirect(Route),
}

/// Decide whether a session may render `route`, or where to send it instead.
pub fn guard(
  role: Option<Role>,
  onboarding_complete: bool,
  route: Route,
) -> RouteDecision {
  if route.is_public() {
    return RouteDecision::Allow;
  }

  let Some(role) = role else {
    return RouteDecision::Redirect(if route.is_onboarding() {
      Route::RegisterRole
    } else {
      Route::Login
    });
  };

  if !onboarding_complete && route.is_dashboard() {
    return RouteDecision::Redirect(Route::OnboardingFor(role));
  }
  if onboarding_complete && route.is_onboarding() {
    return RouteDecision::Redirect(Route::DashboardFor(role));
  }
  // `/onboarding` itself picks the role-specific form.
  if route == Route::Onboarding
    || (route.is_onboarding() && !can_navigate(role, route))
  {
    return RouteDecision::Redirect(Route::OnboardingFor(role));
  }
  if route == Route::Dashboard || !can_navigate(role, route) {
    return RouteDecision::Redirect(Route::DashboardFor(role));
  }

  RouteDecision::Allow
}
