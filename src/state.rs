//! Application state shared by all handlers.
//!
//! This module owns:
//!   - the content store (seeds + optional bank file)
//!   - the prompts struct (from TOML or defaults)
//!   - optional OpenAI client
//!   - the grading rate limiter

use std::time::Duration;

use tracing::{info, instrument};

use crate::config::load_app_config_from_env;
use crate::openai::OpenAI;
use crate::ratelimit::RateLimiter;
use crate::store::{ContentError, ContentStore};

/// Grading throttle: per peer address, per fixed window.
pub const GRADE_MAX_PER_WINDOW: u32 = 6;
pub const GRADE_WINDOW: Duration = Duration::from_secs(60);

pub struct AppState {
    pub store: ContentStore,
    pub openai: Option<OpenAI>,
    pub prompts: crate::config::Prompts,
    pub grade_limiter: RateLimiter,
}

impl AppState {
    /// Build state from env: load config, merge content, init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn init() -> Result<Self, ContentError> {
        let config = load_app_config_from_env().unwrap_or_default();
        let store = ContentStore::load(&config)?;

        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(
                target: "politografisi_backend",
                base_url = %oa.base_url,
                grading_model = %oa.grading_model,
                transcribe_model = %oa.transcribe_model,
                "OpenAI enabled."
            );
        } else {
            info!(
                target: "politografisi_backend",
                "OpenAI disabled (no OPENAI_API_KEY). Grading falls back to the local rubric."
            );
        }

        Ok(Self {
            store,
            openai,
            prompts: config.prompts,
            grade_limiter: RateLimiter::new(GRADE_MAX_PER_WINDOW, GRADE_WINDOW),
        })
    }
}
