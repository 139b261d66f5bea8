//! JSON REST API for the Kaizen portal.
//!
//! Exposes an axum [`Router`] backed by a [`Portal`] over any
//! [`KeyValueStore`]. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", kaizen_api::api_router(state))
//! ```

pub mod directory;
pub mod error;
pub mod session;
pub mod submissions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use kaizen_core::{session::Session, store::KeyValueStore};
use kaizen_sync::Portal;
use tokio::sync::Mutex;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
///
/// The portal sits behind a single async mutex, so at most one request
/// mutates application state at a time. `POST /submissions` releases it
/// while the classifier runs. Locks are taken portal first, then session.
pub struct AppState<S> {
  pub portal:     Arc<Mutex<Portal<S>>>,
  /// The kiosk's wizard position.
  pub session:    Arc<Mutex<Session>>,
  /// Externally reachable base URL, used to build per-site kiosk links.
  pub public_url: Option<String>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      portal:     self.portal.clone(),
      session:    self.session.clone(),
      public_url: self.public_url.clone(),
    }
  }
}

impl<S: KeyValueStore> AppState<S> {
  pub fn new(portal: Portal<S>, public_url: Option<String>) -> Self {
    Self {
      portal: Arc::new(Mutex::new(portal)),
      session: Arc::new(Mutex::new(Session::default())),
      public_url,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: KeyValueStore + 'static,
{
  Router::new()
    // Reference data
    .route("/employees", get(directory::employees::<S>))
    .route("/locations", get(directory::locations::<S>))
    .route("/waste-categories", get(directory::waste_categories))
    // Submissions
    .route(
      "/submissions",
      get(submissions::list::<S>).post(submissions::create::<S>),
    )
    .route("/submissions/{id}/card", get(submissions::card::<S>))
    .route("/wall/stats", get(submissions::stats::<S>))
    .route("/reload", post(submissions::reload::<S>))
    // Kiosk session
    .route(
      "/session",
      get(session::start::<S>).delete(session::forget::<S>),
    )
    .route("/session/location", put(session::select_location::<S>))
    .route("/session/employee", put(session::select_employee::<S>))
    .route("/session/back", post(session::back::<S>))
    .with_state(state)
}
