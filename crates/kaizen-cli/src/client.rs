//! Async HTTP client wrapping the Kaizen JSON API.

use anyhow::{Context, Result, anyhow};
use kaizen_core::{
  employee::Employee,
  location::Location,
  session::Session,
  submission::{NewSubmission, SubmissionRecord},
};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use std::time::Duration;

/// Connection settings for the Kaizen API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// One entry of `GET /api/locations`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntry {
  pub name:      Location,
  #[serde(default)]
  pub kiosk_url: Option<String>,
}

/// Async HTTP client for the Kaizen JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Send `req`, turning a non-success status into an error carrying the
  /// server's `{"error": ...}` message when there is one.
  async fn send(&self, what: &str, req: RequestBuilder) -> Result<Response> {
    let resp = req.send().await.with_context(|| format!("{what} failed"))?;
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|v| v["error"].as_str().map(str::to_owned))
      .unwrap_or_else(|| status.to_string());
    Err(anyhow!("{what} → {message}"))
  }

  async fn json<T: DeserializeOwned>(&self, what: &str, req: RequestBuilder) -> Result<T> {
    self
      .send(what, req)
      .await?
      .json()
      .await
      .with_context(|| format!("deserialising {what}"))
  }

  // ── Reference data ────────────────────────────────────────────────────────

  /// `GET /api/locations`
  pub async fn locations(&self) -> Result<Vec<LocationEntry>> {
    self
      .json("GET /locations", self.client.get(self.url("/locations")))
      .await
  }

  /// `GET /api/employees`
  pub async fn employees(&self) -> Result<Vec<Employee>> {
    self
      .json("GET /employees", self.client.get(self.url("/employees")))
      .await
  }

  // ── Session ───────────────────────────────────────────────────────────────

  /// `GET /api/session[?loc=<location>]`
  pub async fn start_session(&self, location: Option<&str>) -> Result<Session> {
    let mut req = self.client.get(self.url("/session"));
    if let Some(loc) = location {
      req = req.query(&[("loc", loc)]);
    }
    self.json("GET /session", req).await
  }

  /// `PUT /api/session/location`
  pub async fn select_location(&self, location: Location) -> Result<Session> {
    let req = self
      .client
      .put(self.url("/session/location"))
      .json(&json!({ "location": location }));
    self.json("PUT /session/location", req).await
  }

  /// `PUT /api/session/employee`
  pub async fn select_employee(&self, employee_id: &str) -> Result<Session> {
    let req = self
      .client
      .put(self.url("/session/employee"))
      .json(&json!({ "employeeId": employee_id }));
    self.json("PUT /session/employee", req).await
  }

  /// `POST /api/session/back`
  pub async fn back(&self) -> Result<Session> {
    self
      .json("POST /session/back", self.client.post(self.url("/session/back")))
      .await
  }

  /// `DELETE /api/session`
  pub async fn forget(&self) -> Result<()> {
    self
      .send("DELETE /session", self.client.delete(self.url("/session")))
      .await?;
    Ok(())
  }

  // ── Submissions ───────────────────────────────────────────────────────────

  /// `POST /api/submissions`
  pub async fn submit(&self, input: &NewSubmission) -> Result<SubmissionRecord> {
    let req = self.client.post(self.url("/submissions")).json(input);
    self.json("POST /submissions", req).await
  }

  /// `GET /api/submissions[?q=<term>]`
  pub async fn submissions(&self, term: &str) -> Result<Vec<SubmissionRecord>> {
    let mut req = self.client.get(self.url("/submissions"));
    if !term.is_empty() {
      req = req.query(&[("q", term)]);
    }
    self.json("GET /submissions", req).await
  }

  /// `GET /api/submissions/<id>/card`
  pub async fn card(&self, id: &str) -> Result<String> {
    let path = format!("/submissions/{id}/card");
    self
      .send("GET card", self.client.get(self.url(&path)))
      .await?
      .text()
      .await
      .context("reading card")
  }
}
