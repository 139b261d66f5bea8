//! The `KeyValueStore` trait and the in-memory implementation.
//!
//! The trait is implemented by storage backends (e.g. `kaizen-store-sqlite`).
//! Higher layers (`kaizen-sync`, `kaizen-api`) depend on this abstraction,
//! not on any concrete backend.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  sync::{Arc, Mutex, PoisonError},
};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// The storage keys the portal uses.
pub mod keys {
  /// JSON array of every known submission, newest local entries first.
  pub const SUBMISSIONS: &str = "kaizen_submissions";
  /// Employee id remembered for auto-resume.
  pub const USER_ID: &str = "kaizen_user_id";
  /// Location remembered for auto-resume.
  pub const LOCATION: &str = "kaizen_location";
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A persistent string-to-string map with no expiry.
///
/// Values are always written whole; there is no partial update.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait KeyValueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value at `key`. Returns `None` if it was never set.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Overwrite the value at `key`.
  fn set<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete `key`. Deleting a missing key is not an error.
  fn remove<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// A [`KeyValueStore`] held in process memory. Lost on restart.
///
/// Cloning is cheap and clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn map(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(self.map().get(key).cloned())
  }

  async fn set(&self, key: &str, value: String) -> Result<(), Infallible> {
    self.map().insert(key.to_string(), value);
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), Infallible> {
    self.map().remove(key);
    Ok(())
  }
}
