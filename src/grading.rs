//! Grading behaviors shared by the HTTP handlers.
//!
//! Essay answers and speaking transcripts are graded by the model when an
//! OpenAI client is configured, with a deterministic local rubric as the
//! fallback so grading keeps working offline. Speaking answers are
//! transcribed first, then graded like essays under the speaking prompts.

use base64::Engine;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::state::AppState;
use crate::util::trunc_for_log;

/// Passing threshold on the 0-100 scale.
pub const PASS_SCORE: f32 = 60.0;

/// Answers shorter than this (in characters) lose the length credit.
const MIN_ANSWER_CHARS: usize = 20;

/// Result of grading one answer.
#[derive(Clone, Debug)]
pub struct GradeOutcome {
  pub correct: bool,
  pub score: f32,
  pub explanation: String,
  /// "model" when the grade came from the AI backend, "local_rubric" when
  /// the deterministic fallback produced it.
  pub origin: &'static str,
}

#[derive(Debug, Error)]
pub enum GradingError {
  #[error("invalid audio payload: {0}")]
  BadAudio(String),
  #[error("speech transcription is not configured")]
  TranscriptionUnavailable,
  #[error("speech transcription failed: {0}")]
  TranscriptionFailed(String),
}

/// Grade a written answer against a model answer.
#[instrument(level = "info", skip(state, question, model_answer, answer), fields(answer_len = answer.len()))]
pub async fn grade_essay(
  state: &AppState,
  question: &str,
  model_answer: &str,
  answer: &str,
) -> GradeOutcome {
  if let Some(oa) = &state.openai {
    match oa
      .grade_answer(
        &state.prompts.essay_system,
        &state.prompts.essay_user_template,
        question,
        model_answer,
        answer,
      )
      .await
    {
      Ok(grade) => {
        return GradeOutcome {
          correct: grade.correct,
          score: grade.score,
          explanation: grade.explanation,
          origin: "model",
        }
      }
      Err(e) => {
        error!(target: "grading", error = %e, "OpenAI essay grading failed; using local rubric.");
      }
    }
  }
  local_rubric(model_answer, answer)
}

/// Transcribe and grade a spoken answer. Returns the outcome together with
/// the transcript so the caller can echo it back.
#[instrument(level = "info", skip(state, audio_base64, question, model_answer), fields(audio_b64_len = audio_base64.len(), %mime))]
pub async fn grade_speaking(
  state: &AppState,
  audio_base64: &str,
  mime: &str,
  question: &str,
  model_answer: &str,
) -> Result<(GradeOutcome, String), GradingError> {
  let audio = base64::engine::general_purpose::STANDARD
    .decode(audio_base64.trim())
    .map_err(|e| GradingError::BadAudio(e.to_string()))?;
  if audio.is_empty() {
    return Err(GradingError::BadAudio("empty audio payload".into()));
  }

  let oa = state
    .openai
    .as_ref()
    .ok_or(GradingError::TranscriptionUnavailable)?;
  let transcript = oa
    .transcribe_audio(audio, mime)
    .await
    .map_err(GradingError::TranscriptionFailed)?;
  debug!(target: "grading", transcript = %trunc_for_log(&transcript, 120), "Speaking answer transcribed");

  let outcome = match oa
    .grade_answer(
      &state.prompts.speaking_system,
      &state.prompts.speaking_user_template,
      question,
      model_answer,
      &transcript,
    )
    .await
  {
    Ok(grade) => GradeOutcome {
      correct: grade.correct,
      score: grade.score,
      explanation: grade.explanation,
      origin: "model",
    },
    Err(e) => {
      error!(target: "grading", error = %e, "OpenAI speaking grading failed; using local rubric.");
      local_rubric(model_answer, &transcript)
    }
  };

  Ok((outcome, transcript))
}

// -------- Local fallback rubric --------

fn local_rubric(model_answer: &str, answer: &str) -> GradeOutcome {
  let answer = answer.trim();
  if answer.is_empty() {
    return GradeOutcome {
      correct: false,
      score: 0.0,
      explanation: "Δεν δόθηκε απάντηση.".into(),
      origin: "local_rubric",
    };
  }

  let mut score = 50.0_f32;
  let mut notes: Vec<String> = vec![];

  if answer.chars().count() >= MIN_ANSWER_CHARS {
    score += 15.0;
  } else {
    notes.push("Η απάντηση είναι πολύ σύντομη.".into());
  }

  let keywords = rubric_keywords(model_answer);
  let lowered = answer.to_lowercase();
  let mut hits = 0usize;
  for kw in &keywords {
    if lowered.contains(kw.as_str()) {
      score += 5.0;
      hits += 1;
    }
  }
  if !keywords.is_empty() && hits == 0 {
    score -= 10.0;
    notes.push("Η απάντηση δεν καλύπτει τα βασικά σημεία.".into());
  }

  score = score.clamp(0.0, 100.0);
  let correct = score >= PASS_SCORE;
  let mut explanation = if notes.is_empty() {
    "Η απάντηση καλύπτει τα βασικά σημεία.".to_string()
  } else {
    notes.join(" ")
  };
  explanation.push_str(&format!(" (Βαθμός: {:.0}/100)", score));

  GradeOutcome { correct, score, explanation, origin: "local_rubric" }
}

// Longer content words of the model answer double as a keyword checklist.
fn rubric_keywords(model_answer: &str) -> Vec<String> {
  let mut keywords: Vec<String> = Vec::new();
  for word in model_answer.split(|c: char| !c.is_alphanumeric()) {
    if word.chars().count() < 5 {
      continue;
    }
    let lowered = word.to_lowercase();
    if !keywords.contains(&lowered) {
      keywords.push(lowered);
    }
    if keywords.len() == 8 {
      break;
    }
  }
  keywords
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Prompts;
  use crate::ratelimit::RateLimiter;
  use crate::store::ContentStore;
  use std::time::Duration;

  fn offline_state() -> AppState {
    AppState {
      store: ContentStore::empty(),
      openai: None,
      prompts: Prompts::default(),
      grade_limiter: RateLimiter::new(10, Duration::from_secs(60)),
    }
  }

  #[test]
  fn empty_answer_scores_zero() {
    let outcome = local_rubric("Η Αθήνα είναι η πρωτεύουσα.", "   ");
    assert!(!outcome.correct);
    assert_eq!(outcome.score, 0.0);
  }

  #[test]
  fn covering_answer_passes_locally() {
    let model = "Ο υποψήφιος αναφέρει την πρωτεύουσα Αθήνα και την περιφέρεια Αττικής.";
    let answer = "Η πρωτεύουσα της χώρας είναι η Αθήνα, που βρίσκεται στην περιφέρεια της Αττικής.";
    let outcome = local_rubric(model, answer);
    assert!(outcome.correct, "score {}", outcome.score);
    assert_eq!(outcome.origin, "local_rubric");
  }

  #[test]
  fn unrelated_short_answer_fails_locally() {
    let model = "Ο υποψήφιος περιγράφει το Πάσχα και τα έθιμά του.";
    let outcome = local_rubric(model, "δεν ξέρω");
    assert!(!outcome.correct, "score {}", outcome.score);
  }

  #[tokio::test]
  async fn essay_grading_falls_back_without_a_client() {
    let state = offline_state();
    let outcome = grade_essay(
      &state,
      "Περιγράψτε τη γειτονιά σας.",
      "Περιγραφή με μαγαζιά, πάρκο, συγκοινωνίες.",
      "Στη γειτονιά μου υπάρχουν μαγαζιά, ένα μεγάλο πάρκο και καλές συγκοινωνίες.",
    )
    .await;
    assert_eq!(outcome.origin, "local_rubric");
  }

  #[tokio::test]
  async fn speaking_without_a_client_is_a_structured_error() {
    let state = offline_state();
    let err = grade_speaking(&state, "AAAA", "audio/webm", "q", "m").await.unwrap_err();
    assert!(matches!(err, GradingError::TranscriptionUnavailable));
  }

  #[tokio::test]
  async fn invalid_base64_is_rejected() {
    let state = offline_state();
    let err = grade_speaking(&state, "όχι base64!", "audio/webm", "q", "m").await.unwrap_err();
    assert!(matches!(err, GradingError::BadAudio(_)));
  }
}
