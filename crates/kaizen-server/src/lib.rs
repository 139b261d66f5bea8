//! HTTP host for the Kaizen portal.
//!
//! Loads [`ServerConfig`] and [`PortalConfig`] from one layered source (an
//! optional TOML file, then `KAIZEN_*` environment variables) and mounts the
//! JSON API under `/api`.
//!
//! ```toml
//! host       = "0.0.0.0"
//! port       = 8080
//! store_path = "~/.local/share/kaizen/kaizen.db"
//! public_url = "https://kaizen.example.com"
//!
//! directory_url         = "https://docs.google.com/.../pub?output=csv"
//! submissions_read_url  = "https://docs.google.com/.../pub?output=csv"
//! submissions_write_url = "https://script.google.com/macros/s/.../exec"
//!
//! [classifier]
//! api_key = "..."
//! ```

use std::path::{Path, PathBuf};

use axum::Router;
use kaizen_api::{AppState, api_router};
use kaizen_core::{config::PortalConfig, store::KeyValueStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Base URL printed into kiosk links.
  #[serde(default)]
  pub public_url: Option<String>,
}

/// Read both configs from `path` (optional) and the environment.
///
/// Nested keys use `__` in variable names, e.g. `KAIZEN_CLASSIFIER__API_KEY`.
pub fn load_config(path: &Path) -> Result<(ServerConfig, PortalConfig), config::ConfigError> {
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "~/.local/share/kaizen/kaizen.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(
      config::Environment::with_prefix("KAIZEN")
        .separator("__")
        .try_parsing(true),
    )
    .build()?;

  let server: ServerConfig = settings.clone().try_deserialize()?;
  let portal: PortalConfig = settings.try_deserialize()?;
  Ok((server, portal))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the API under `/api`, with request tracing.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: KeyValueStore + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::{io::Write as _, sync::Arc};

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use kaizen_store_sqlite::SqliteStore;
  use kaizen_sync::Portal;
  use tower::ServiceExt as _;

  #[test]
  fn config_file_fills_both_halves() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
      file,
      r#"
port = 9090
store_path = "/tmp/kaizen.db"
public_url = "https://kiosk.example.com"
directory_url = "https://example.com/dir.csv"

[classifier]
api_key = "k"
"#
    )
    .unwrap();

    let (server, portal) = load_config(file.path()).unwrap();
    assert_eq!(server.host, "127.0.0.1");
    assert_eq!(server.port, 9090);
    assert_eq!(server.public_url.as_deref(), Some("https://kiosk.example.com"));
    assert_eq!(portal.directory_url(), Some("https://example.com/dir.csv"));
    assert_eq!(portal.submissions_read_url(), None);
    assert_eq!(portal.classifier().unwrap().api_key, "k");
  }

  #[test]
  fn missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (server, portal) = load_config(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(server.port, 8080);
    assert!(portal.classifier().is_none());
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/kaizen.db")),
      PathBuf::from(home).join("kaizen.db")
    );
    assert_eq!(expand_tilde(Path::new("/abs")), PathBuf::from("/abs"));
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let mut portal = Portal::new(PortalConfig::default(), Arc::new(store)).unwrap();
    portal.load().await.unwrap();
    let app = router(AppState::new(portal, None));

    let req = Request::builder()
      .uri("/api/waste-categories")
      .body(Body::empty())
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body[0], "Defects");

    let req = Request::builder()
      .uri("/waste-categories")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
