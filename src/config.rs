//! Loading application configuration (grading prompts + optional content
//! bank location) from TOML.
//!
//! See `AppConfig` and `Prompts` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  /// Path to a JSON content bank (document-store export keyed by collection
  /// name). Merged over the built-in seed content at startup.
  #[serde(default)]
  pub content_bank: Option<String>,
}

/// Prompts used by the grading client. Defaults are sensible for the
/// naturalization-interview domain; override them in TOML to tune tone.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  // Essay (open-response) grading
  pub essay_system: String,
  pub essay_user_template: String,
  // Speaking grading (runs on the transcript)
  pub speaking_system: String,
  pub speaking_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      essay_system: "You are a strict but fair examiner for the Greek naturalization exam. Grade the candidate's written answer against the model answer. Judge content, not spelling. Output JSON only.".into(),
      essay_user_template: "Question: {question}\nModel answer: {model_answer}\nCandidate answer: {answer}\n\nReturn JSON: {\"correct\": boolean, \"score\": number, \"explanation\": string}\nScoring: 0-100. 'correct' = true if score >= 60. Explanation in Greek, 1-2 sentences.".into(),
      speaking_system: "You are an examiner grading a spoken answer from the Greek naturalization interview. The text you receive is an automatic transcript; ignore transcription artifacts and grade the content. Output JSON only.".into(),
      speaking_user_template: "Question: {question}\nModel answer: {model_answer}\nTranscript of spoken answer: {answer}\n\nReturn JSON: {\"correct\": boolean, \"score\": number, \"explanation\": string}\nScoring: 0-100. 'correct' = true if score >= 60. Be lenient with phrasing; this was spoken. Explanation in Greek, 1-2 sentences.".into(),
    }
  }
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO
/// error, returns None and the defaults apply.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "politografisi_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "politografisi_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "politografisi_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
