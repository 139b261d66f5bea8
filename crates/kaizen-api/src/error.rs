//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<kaizen_core::Error> for ApiError {
  fn from(e: kaizen_core::Error) -> Self {
    use kaizen_core::Error as E;
    match e {
      E::UnknownLocation(_)
      | E::UnknownEmployee(_)
      | E::MissingField(_)
      | E::NoLocationSelected => ApiError::BadRequest(e.to_string()),
      E::Serialization(_) | E::Store(_) => ApiError::Store(Box::new(e)),
    }
  }
}

impl From<kaizen_sync::Error> for ApiError {
  fn from(e: kaizen_sync::Error) -> Self {
    match e {
      kaizen_sync::Error::Core(e) => e.into(),
      other => ApiError::Store(Box::new(other)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
