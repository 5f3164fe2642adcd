//! HTTP server assembly for Touchline.
//!
//! Mounts the JSON API from `touchline-api` under `/api`, adds a liveness
//! probe, and wraps everything in request tracing.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use axum::{Router, routing::get};
use serde::Deserialize;
use touchline_api::{ApiState, api_router};
use touchline_core::{profile::Directory, store::KvStore};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TOUCHLINE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  /// JSON seed for the discover directory. Without one the directory is
  /// empty.
  #[serde(default)]
  pub directory_path: Option<PathBuf>,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Load the profile directory, or an empty one when no seed is configured.
pub fn load_directory(path: Option<&Path>) -> anyhow::Result<Directory> {
  let Some(path) = path else {
    tracing::warn!("no directory_path configured; directory is empty");
    return Ok(Directory::default());
  };
  let directory = Directory::load(path)
    .with_context(|| format!("failed to load directory seed {path:?}"))?;
  tracing::info!(profiles = directory.len(), "loaded profile directory");
  Ok(directory)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level [`Router`].
pub fn router<S>(state: ApiState<S>) -> Router
where
  S: KvStore + 'static,
{
  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
