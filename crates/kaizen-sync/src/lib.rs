//! Network side of the Kaizen portal.
//!
//! Fetches the published sheets, posts new submissions to the write
//! webhook, asks the classifier for a waste category, and ties all of it to
//! local storage through [`Portal`].
//!
//! Every remote call is best-effort. Failures are logged and the portal
//! falls back to built-in or locally persisted data; none of them surface
//! as errors to the kiosk.

pub mod classify;
pub mod error;
pub mod portal;
pub mod sheet;
pub mod webhook;

use std::time::Duration;

pub use error::{Error, Result};
pub use portal::{Draft, Portal};

/// Build the shared HTTP client.
///
/// Cheap to clone afterwards; [`reqwest::Client`] is `Arc`-based.
pub fn http_client() -> Result<reqwest::Client> {
  Ok(
    reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?,
  )
}
