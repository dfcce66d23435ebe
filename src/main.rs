//! Quizgen · Exam Question Generation Backend
//!
//! - Axum HTTP API: one question-generation endpoint + health check
//! - Gemini integration (via environment variables)
//!
//! Important env variables:
//!   PORT            : u16 (default 3000)
//!   GEMINI_API_KEY  : required for generation; without it every request fails
//!   GEMINI_BASE_URL : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL    : default "gemini-2.0-flash-001"
//!   GEN_CONFIG_PATH : path to TOML config (model, endpoint, sampling)
//!   LOG_LEVEL       : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use quizgen_backend::routes::build_router;
use quizgen_backend::state::AppState;
use quizgen_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (config + optional Gemini client).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizgen_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
