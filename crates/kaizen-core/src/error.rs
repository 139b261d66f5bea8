//! Error types for `kaizen-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown location: {0:?}")]
  UnknownLocation(String),

  #[error("employee not found: {0}")]
  UnknownEmployee(String),

  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("no location selected")]
  NoLocationSelected,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error from a [`KeyValueStore`](crate::store::KeyValueStore).
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
