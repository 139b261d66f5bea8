//! Handlers for `/submissions` and the huddle wall.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/submissions` | Optional `?q=<term>&location=<site>`, newest first |
//! | `POST` | `/submissions` | Body: `{"location", "employeeId", "problem", "idea"}` |
//! | `GET`  | `/submissions/:id/card` | Plain-text card, 404 if not found |
//! | `GET`  | `/wall/stats` | Counts per waste category |
//! | `POST` | `/reload` | Re-fetch the sheet and reconcile |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use kaizen_core::{
  card,
  classify::Classifier,
  store::KeyValueStore,
  submission::{NewSubmission, SubmissionRecord},
  wall::{self, WallStats},
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Case-insensitive match over employee name, problem and idea.
  pub q:        Option<String>,
  /// Exact site label.
  pub location: Option<String>,
}

/// `GET /submissions[?q=...][&location=...]`
pub async fn list<S: KeyValueStore>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Json<Vec<SubmissionRecord>> {
  let portal = state.portal.lock().await;
  let hits = wall::search(
    portal.submissions(),
    params.q.as_deref().unwrap_or_default(),
    params.location.as_deref().filter(|l| !l.is_empty()),
  );
  Json(hits.into_iter().cloned().collect())
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /submissions`
///
/// The portal is unlocked while the classifier runs.
pub async fn create<S: KeyValueStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewSubmission>,
) -> Result<impl IntoResponse, ApiError> {
  let (draft, classifier) = {
    let portal = state.portal.lock().await;
    (portal.validate(body)?, portal.classifier().clone())
  };
  let classification = classifier.classify(&draft.problem, &draft.idea).await;
  let record = state
    .portal
    .lock()
    .await
    .record(draft, classification)
    .await?;
  state.session.lock().await.finish();
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Card ─────────────────────────────────────────────────────────────────────

/// `GET /submissions/:id/card`
pub async fn card<S: KeyValueStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<String, ApiError> {
  let portal = state.portal.lock().await;
  let record = portal
    .submission(&id)
    .ok_or_else(|| ApiError::NotFound(format!("submission {id} not found")))?;
  Ok(card::render(record))
}

// ─── Wall ─────────────────────────────────────────────────────────────────────

/// `GET /wall/stats`
pub async fn stats<S: KeyValueStore>(State(state): State<AppState<S>>) -> Json<WallStats> {
  Json(wall::waste_breakdown(state.portal.lock().await.submissions()))
}

/// `POST /reload`
pub async fn reload<S: KeyValueStore>(
  State(state): State<AppState<S>>,
) -> Result<StatusCode, ApiError> {
  state.portal.lock().await.load().await?;
  Ok(StatusCode::NO_CONTENT)
}
