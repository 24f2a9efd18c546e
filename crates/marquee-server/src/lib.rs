//! HTTP server assembly for Marquee.
//!
//! Loads [`ServerConfig`], and wraps the JSON API from `marquee-api` with a
//! health check, request ids and request tracing.

pub mod request_id;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use axum::{Json, Router, http::StatusCode, middleware, routing::get};
use marquee_core::{service::WatchlistService, store::WatchStore};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use request_id::{make_span_with_request_id, request_id_middleware};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, read from `config.toml` and `MARQUEE_*`
/// environment variables (the latter win).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite database file; a leading `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3003 }

fn default_store_path() -> PathBuf { PathBuf::from("marquee.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      store_path: default_store_path(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional file at `path` under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("MARQUEE"))
      .build()
      .with_context(|| format!("failed to read config from {path:?}"))?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
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

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: `/health` plus the API under `/api`.
pub fn app<S>(service: WatchlistService<S>) -> Router
where
  S: WatchStore + 'static,
{
  Router::new()
    .route("/health", get(health_check))
    .nest("/api", marquee_api::api_router(service))
    .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
    .layer(middleware::from_fn(request_id_middleware))
}

async fn health_check() -> (StatusCode, Json<Value>) {
  (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
