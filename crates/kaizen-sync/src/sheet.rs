//! Fetching published CSV exports.

use reqwest::Client;

use crate::{Error, Result};

/// Reads CSV text from a published sheet URL.
#[derive(Clone)]
pub struct SheetClient {
  client: Client,
}

impl SheetClient {
  pub fn new(client: Client) -> Self { Self { client } }

  /// `GET url`; a non-success status is an error.
  pub async fn fetch_csv(&self, url: &str) -> Result<String> {
    let resp = self.client.get(url).send().await?;

    if !resp.status().is_success() {
      return Err(Error::Status {
        method: "GET",
        url:    url.to_string(),
        status: resp.status(),
      });
    }
    Ok(resp.text().await?)
  }
}

#[cfg(test)]
mod tests {
  use axum::{Router, http::StatusCode, routing::get};

  use super::*;
  use crate::{
    http_client,
    test_support::{DEAD_URL, serve},
  };

  #[tokio::test]
  async fn returns_body_text() {
    let base = serve(Router::new().route("/sheet.csv", get(|| async { "id,name\nemp1,Jane\n" }))).await;
    let sheets = SheetClient::new(http_client().unwrap());
    let text = sheets.fetch_csv(&format!("{base}/sheet.csv")).await.unwrap();
    assert_eq!(text, "id,name\nemp1,Jane\n");
  }

  #[tokio::test]
  async fn non_success_status_is_an_error() {
    let base = serve(Router::new().route(
      "/sheet.csv",
      get(|| async { (StatusCode::NOT_FOUND, "gone") }),
    ))
    .await;
    let sheets = SheetClient::new(http_client().unwrap());
    let err = sheets
      .fetch_csv(&format!("{base}/sheet.csv"))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Status { status, .. } if status == StatusCode::NOT_FOUND));
  }

  #[tokio::test]
  async fn unreachable_host_is_an_error() {
    let sheets = SheetClient::new(http_client().unwrap());
    assert!(matches!(
      sheets.fetch_csv(DEAD_URL).await,
      Err(Error::Http(_))
    ));
  }
}
