//! Politografisi · Exam-Prep Backend
//!
//! - Axum HTTP API: exam generation + AI-assisted grading
//! - Content from built-in seeds plus an optional JSON bank file
//! - Optional OpenAI integration (via environment variables)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   APP_CONFIG_PATH   : path to TOML config (prompts + content bank path)
//!   OPENAI_API_KEY    : enables AI grading/transcription if present
//!   OPENAI_BASE_URL   : default "https://api.openai.com/v1"
//!   OPENAI_GRADING_MODEL    : default "gpt-4o"
//!   OPENAI_TRANSCRIBE_MODEL : default "whisper-1"
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod content;
mod sampling;
mod config;
mod seeds;
mod store;
mod assembler;
mod state;
mod protocol;
mod grading;
mod openai;
mod ratelimit;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (content store, OpenAI client, prompts).
  let state = Arc::new(AppState::init()?);

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "politografisi_backend", %addr, "HTTP server listening");
  // Peer addresses key the grading rate limiter.
  axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
  Ok(())
}
