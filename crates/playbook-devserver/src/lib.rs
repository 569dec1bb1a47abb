//! Read-only static file server for browsing the dataset during development.
//!
//! Serves one directory over HTTP with client-side caching disabled, so the
//! browser always sees the file as it is on disk after a tool rewrites it.

use std::path::PathBuf;

use axum::{
  Router,
  http::{HeaderName, HeaderValue, header},
};
use serde::Deserialize;
use tower_http::{
  services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `devserver.toml`.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Directory to serve.
  pub root: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: "0.0.0.0".to_string(),
      port: 8000,
      root: PathBuf::from("src"),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

const NO_CACHE: [(HeaderName, &str); 3] = [
  (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate, max-age=0"),
  (header::PRAGMA, "no-cache"),
  (header::EXPIRES, "0"),
];

/// Build a [`Router`] serving `root` read-only with caching disabled on
/// every response, errors included.
pub fn router(root: PathBuf) -> Router {
  let mut app = Router::new().fallback_service(ServeDir::new(root));
  for (name, value) in NO_CACHE {
    app = app.layer(SetResponseHeaderLayer::overriding(
      name,
      HeaderValue::from_static(value),
    ));
  }
  app.layer(TraceLayer::new_for_http())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
