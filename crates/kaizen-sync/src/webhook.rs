//! Posting new submissions to the sheet's write webhook.
//!
//! The webhook is fire-and-forget: nothing waits on it, nothing retries it,
//! and its response body is never read.

use kaizen_core::submission::SubmissionRecord;
use reqwest::{Client, header};
use tokio::task::JoinHandle;

use crate::{Error, Result};

/// Sends records to one webhook URL.
#[derive(Clone)]
pub struct WebhookSink {
  client: Client,
  url:    String,
}

impl WebhookSink {
  pub fn new(client: Client, url: impl Into<String>) -> Self {
    Self {
      client,
      url: url.into(),
    }
  }

  pub fn url(&self) -> &str { &self.url }

  /// POST the JSON-serialised record.
  ///
  /// The body goes out as `text/plain`, which script-hosted webhooks accept
  /// without a CORS preflight.
  pub async fn send(&self, record: &SubmissionRecord) -> Result<()> {
    let body = serde_json::to_string(record)?;
    let resp = self
      .client
      .post(&self.url)
      .header(header::CONTENT_TYPE, "text/plain;charset=utf-8")
      .body(body)
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status {
        method: "POST",
        url:    self.url.clone(),
        status: resp.status(),
      });
    }
    Ok(())
  }

  /// Send `record` in the background. Failures are logged and dropped.
  ///
  /// Callers may ignore the returned handle.
  pub fn dispatch(&self, record: SubmissionRecord) -> JoinHandle<()> {
    let sink = self.clone();
    tokio::spawn(async move {
      match sink.send(&record).await {
        Ok(()) => tracing::debug!(id = %record.id, "submission synced"),
        Err(e) => tracing::warn!(id = %record.id, error = %e, "submission sync failed"),
      }
    })
  }
}
