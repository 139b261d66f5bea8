//! Handlers for the kiosk wizard at `/session`.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/session` | Optional `?loc=<site>`; (re)starts the wizard |
//! | `PUT`    | `/session/location` | Body: `{"location":"Bend"}` |
//! | `PUT`    | `/session/employee` | Body: `{"employeeId":"emp1"}` |
//! | `POST`   | `/session/back` | One step back |
//! | `DELETE` | `/session` | Forget remembered selections |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
};
use kaizen_core::{session::Session, store::KeyValueStore};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct StartParams {
  pub loc: Option<String>,
}

/// `GET /session[?loc=<site>]`
pub async fn start<S: KeyValueStore>(
  State(state): State<AppState<S>>,
  Query(params): Query<StartParams>,
) -> Result<Json<Session>, ApiError> {
  let fresh = state
    .portal
    .lock()
    .await
    .start_session(params.loc.as_deref())
    .await?;
  let mut session = state.session.lock().await;
  *session = fresh;
  Ok(Json(session.clone()))
}

#[derive(Debug, Deserialize)]
pub struct LocationBody {
  pub location: String,
}

/// `PUT /session/location`
pub async fn select_location<S: KeyValueStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<LocationBody>,
) -> Result<Json<Session>, ApiError> {
  let portal = state.portal.lock().await;
  let mut session = state.session.lock().await;
  session.select_location(portal.store(), &body.location).await?;
  Ok(Json(session.clone()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBody {
  pub employee_id: String,
}

/// `PUT /session/employee`
pub async fn select_employee<S: KeyValueStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<EmployeeBody>,
) -> Result<Json<Session>, ApiError> {
  let portal = state.portal.lock().await;
  let mut session = state.session.lock().await;
  session
    .select_employee(portal.store(), portal.directory(), &body.employee_id)
    .await?;
  Ok(Json(session.clone()))
}

/// `POST /session/back`
pub async fn back<S: KeyValueStore>(State(state): State<AppState<S>>) -> Json<Session> {
  let mut session = state.session.lock().await;
  session.back();
  Json(session.clone())
}

/// `DELETE /session`
pub async fn forget<S: KeyValueStore>(
  State(state): State<AppState<S>>,
) -> Result<StatusCode, ApiError> {
  let portal = state.portal.lock().await;
  Session::forget(portal.store()).await?;
  *state.session.lock().await = Session::default();
  Ok(StatusCode::NO_CONTENT)
}
