//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,exam=debug,grading=debug").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//!
//! Targets in use: `exam` (assembly), `grading`, `content` (store), and
//! `politografisi_backend` (process lifecycle). Targets are included in the
//! output to disambiguate sources; the tower-http TraceLayer adds
//! per-request spans on top of this.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str =
    "info,exam=debug,grading=debug,content=info,politografisi_backend=debug,tower_http=info,axum=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // JSON for log shippers, pretty for humans. The two builders have
    // different types, so finish each inside its own arm.
    if matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}
