use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use kaizen_api::AppState;
use kaizen_server::{expand_tilde, load_config};
use kaizen_store_sqlite::SqliteStore;
use kaizen_sync::Portal;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Kaizen idea portal server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let (server_cfg, portal_cfg) =
    load_config(&cli.config).context("failed to read configuration")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let mut portal =
    Portal::new(portal_cfg, Arc::new(store)).context("failed to build portal")?;
  portal.load().await.context("initial load failed")?;
  tracing::info!(
    employees = portal.directory().len(),
    submissions = portal.submissions().len(),
    "portal ready"
  );

  let app = kaizen_server::router(AppState::new(portal, server_cfg.public_url.clone()));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
