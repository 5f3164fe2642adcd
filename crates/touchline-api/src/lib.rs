//! JSON REST API for Touchline.
//!
//! Exposes an axum [`Router`] backed by any [`touchline_core::store::KvStore`]
//! plus a read-only profile [`Directory`]. Each request names its session
//! with the `x-session-id` header; TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", touchline_api::api_router(state))
//! ```

pub mod club_needs;
pub mod contacts;
pub mod error;
pub mod extract;
pub mod favorites;
pub mod permissions;
pub mod profiles;
pub mod session;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use touchline_core::{Session, profile::Directory, store::KvStore};

pub use error::ApiError;
pub use session::SessionId;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:     Arc<S>,
  pub directory: Arc<Directory>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      directory: Arc::clone(&self.directory),
    }
  }
}

impl<S: KvStore> ApiState<S> {
  pub fn new(store: Arc<S>, directory: Directory) -> Self {
    Self { store, directory: Arc::new(directory) }
  }

  /// The session named by a request.
  pub fn session(&self, id: SessionId) -> Session<S> {
    Session::new(Arc::clone(&self.store), id.0)
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: KvStore + 'static,
{
  Router::new()
    // Session
    .route(
      "/session",
      get(session::summary::<S>).delete(session::sign_out::<S>),
    )
    .route("/session/role", put(session::set_role::<S>))
    .route("/session/onboarding", post(session::complete_onboarding::<S>))
    .route("/navigation", get(session::navigation::<S>))
    // Reference data
    .route("/permissions/{role}", get(permissions::for_role))
    .route("/pipeline/stages", get(permissions::pipeline_stages))
    // Profiles
    .route("/profiles", get(profiles::discover::<S>))
    .route("/profiles/{id}", get(profiles::get_one::<S>))
    // Contact requests
    .route(
      "/contact-requests",
      get(contacts::list::<S>).post(contacts::send::<S>),
    )
    .route("/contact-requests/{target_id}", get(contacts::target_state::<S>))
    // Club needs
    .route(
      "/club-needs",
      get(club_needs::list::<S>).post(club_needs::create::<S>),
    )
    .route(
      "/club-needs/{id}",
      get(club_needs::get_one::<S>)
        .patch(club_needs::update_status::<S>)
        .delete(club_needs::delete_one::<S>),
    )
    // Favorites
    .route("/favorites", get(favorites::list::<S>))
    .route(
      "/favorites/{profile_id}",
      put(favorites::add::<S>).delete(favorites::remove::<S>),
    )
    .with_state(state)
}

#[cfg(test)]
mod tests;
