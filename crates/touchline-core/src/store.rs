//! The `KvStore` trait and the backends that need no external dependencies.
//!
//! Session state is a handful of JSON values under string keys, so the
//! storage seam is a narrow get/set/delete/list interface. Backends
//! (`MemoryStore`, `DetachedStore`, `touchline-store-sqlite`) can be swapped
//! without touching [`crate::Session`].

use std::{
  collections::BTreeMap,
  convert::Infallible,
  future::Future,
  sync::{PoisonError, RwLock},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a key-value backend.
///
/// Writes are last-write-wins per key. All methods return `Send` futures so
/// the trait can be used from a multi-threaded runtime (e.g. tokio with
/// `axum`).
pub trait KvStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value at `key`. Returns `None` if the key is absent.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Write `value` at `key`, replacing any previous value.
  fn set<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove `key`. Returns whether a value was present.
  fn delete<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Every `(key, value)` pair whose key starts with `prefix`, ordered by
  /// key.
  fn list<'a>(
    &'a self,
    prefix: &'a str,
  ) -> impl Future<Output = Result<Vec<(String, String)>, Self::Error>> + Send + 'a;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A process-local store; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl KvStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    Ok(entries.get(key).cloned())
  }

  async fn set(&self, key: &str, value: String) -> Result<(), Infallible> {
    let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
    entries.insert(key.to_owned(), value);
    Ok(())
  }

  async fn delete(&self, key: &str) -> Result<bool, Infallible> {
    let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
    Ok(entries.remove(key).is_some())
  }

  async fn list(&self, prefix: &str) -> Result<Vec<(String, String)>, Infallible> {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    Ok(
      entries
        .range(prefix.to_owned()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect(),
    )
  }
}

// ─── Detached backend ────────────────────────────────────────────────────────

/// Stands in when no storage mechanism is available, as when rendering on a
/// server. Reads find nothing and writes are dropped, so callers see empty
/// defaults instead of errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedStore;

impl KvStore for DetachedStore {
  type Error = Infallible;

  async fn get(&self, _key: &str) -> Result<Option<String>, Infallible> { Ok(None) }

  async fn set(&self, _key: &str, _value: String) -> Result<(), Infallible> {
    Ok(())
  }

  async fn delete(&self, _key: &str) -> Result<bool, Infallible> { Ok(false) }

  async fn list(&self, _prefix: &str) -> Result<Vec<(String, String)>, Infallible> {
    Ok(Vec::new())
  }
}
