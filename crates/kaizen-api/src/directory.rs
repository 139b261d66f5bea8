//! Handlers for reference data: the employee directory, the sites, and the
//! waste taxonomy.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/employees` | Current directory (built-in fallback if none loaded); optional `?location=<site>` |
//! | `GET`  | `/locations` | Every site, with a kiosk link when a public URL is set |
//! | `GET`  | `/waste-categories` | The eight labels |

use axum::{
  Json,
  extract::{Query, State},
};
use kaizen_core::{
  employee::{self, Employee},
  location::Location,
  store::KeyValueStore,
  submission::WasteCategory,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct EmployeeParams {
  /// Only employees whose home site is this label.
  pub location: Option<String>,
}

/// `GET /employees[?location=...]`
pub async fn employees<S: KeyValueStore>(
  State(state): State<AppState<S>>,
  Query(params): Query<EmployeeParams>,
) -> Json<Vec<Employee>> {
  let portal = state.portal.lock().await;
  let directory = portal.directory();
  let hits = match params.location.as_deref().filter(|l| !l.is_empty()) {
    Some(location) => employee::at_location(directory, location).cloned().collect(),
    None => directory.to_vec(),
  };
  Json(hits)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntry {
  pub name:      Location,
  /// `<public url>/?loc=<name>`, for printing per-site QR codes.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub kiosk_url: Option<String>,
}

/// The preselect link for `location`. Labels are letters and spaces only.
pub fn kiosk_link(base: &str, location: Location) -> String {
  format!(
    "{}/?loc={}",
    base.trim_end_matches('/'),
    location.as_ref().replace(' ', "%20")
  )
}

/// `GET /locations`
pub async fn locations<S: KeyValueStore>(
  State(state): State<AppState<S>>,
) -> Json<Vec<LocationEntry>> {
  let entries = Location::all()
    .into_iter()
    .map(|name| LocationEntry {
      name,
      kiosk_url: state.public_url.as_deref().map(|base| kiosk_link(base, name)),
    })
    .collect();
  Json(entries)
}

/// `GET /waste-categories`
pub async fn waste_categories() -> Json<Vec<WasteCategory>> { Json(WasteCategory::all()) }
