//! leadbase-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the Leadbase JSON API over HTTP.
//!
//! # Seeding
//!
//! To load a JSON array of company payloads into the store and exit:
//!
//! ```
//! cargo run -p leadbase-server -- --seed companies.json
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use leadbase_core::{company::NewCompany, store::CompanyStore as _};
use leadbase_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Leadbase lead-management server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load a JSON array of company payloads into the store and exit.
  #[arg(long, value_name = "PATH")]
  seed: Option<PathBuf>,
}

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `LEADBASE_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  host:    String,
  port:    u16,
  db_path: PathBuf,
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

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080_i64)?
    .set_default("db_path", "leads.db")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("LEADBASE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in the database path.
  let db_path = expand_tilde(&server_cfg.db_path);

  // Open SQLite store.
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open store at {db_path:?}"))?;

  // Helper mode: seed the store and exit.
  if let Some(seed_path) = cli.seed {
    let inserted = seed(&store, &seed_path).await?;
    tracing::info!("seeded {inserted} companies from {seed_path:?}");
    return Ok(());
  }

  let app = axum::Router::new()
    .nest("/api", leadbase_api::api_router(Arc::new(store)))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Insert every payload from the JSON file at `path` into `store`.
async fn seed(store: &SqliteStore, path: &Path) -> anyhow::Result<usize> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read seed file {path:?}"))?;
  let payloads: Vec<NewCompany> =
    serde_json::from_str(&raw).context("failed to parse seed file")?;

  let mut inserted = 0;
  for input in payloads {
    input
      .validate()
      .map_err(|e| anyhow::anyhow!("invalid seed record: {e}"))?;
    store.insert(input).await?;
    inserted += 1;
  }
  Ok(inserted)
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
