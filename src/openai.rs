//! Minimal OpenAI client for our use-cases.
//!
//! We call chat.completions with a strict JSON object response for grading,
//! and audio.transcriptions (multipart) for spoken answers. Calls are
//! instrumented and log model names, latencies, and payload sizes (not
//! contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short to
//! avoid PII leaks.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::util::fill_template;

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub grading_model: String,
  pub transcribe_model: String,
}

/// Grade returned by the model for one answer.
#[derive(Clone, Debug, Deserialize)]
pub struct ModelGrade {
  pub correct: bool,
  pub score: f32,
  pub explanation: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let grading_model =
      std::env::var("OPENAI_GRADING_MODEL").unwrap_or_else(|_| "gpt-4o".into());
    let transcribe_model =
      std::env::var("OPENAI_TRANSCRIBE_MODEL").unwrap_or_else(|_| "whisper-1".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, grading_model, transcribe_model })
  }

  /// JSON-object chat completion. Generic over the target type T.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_json<T: for<'a> Deserialize<'a>>(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<T, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      response_format: Some(ResponseFormat { r#type: "json_object".into() }),
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "politografisi-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or_else(|| body);
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default();

    serde_json::from_str::<T>(&text).map_err(|e| format!("JSON parse error: {}", e))
  }

  /// Grade one answer against a model answer with the given prompt pair.
  #[instrument(
    level = "info",
    skip(self, system, user_template, question, model_answer, answer),
    fields(model = %self.grading_model, question_len = question.len(), answer_len = answer.len())
  )]
  pub async fn grade_answer(
    &self,
    system: &str,
    user_template: &str,
    question: &str,
    model_answer: &str,
    answer: &str,
  ) -> Result<ModelGrade, String> {
    let user = fill_template(
      user_template,
      &[
        ("question", question),
        ("model_answer", model_answer),
        ("answer", answer),
      ],
    );
    let start = std::time::Instant::now();
    let result = self.chat_json::<ModelGrade>(&self.grading_model, system, &user, 0.2).await;
    info!(elapsed = ?start.elapsed(), ok = result.is_ok(), "Grading call finished");
    result
  }

  /// Transcribe a spoken answer. Returns plain transcript text.
  #[instrument(level = "info", skip(self, audio), fields(model = %self.transcribe_model, audio_bytes = audio.len(), %mime))]
  pub async fn transcribe_audio(&self, audio: Vec<u8>, mime: &str) -> Result<String, String> {
    let url = format!("{}/audio/transcriptions", self.base_url);
    let file_name = format!("answer.{}", audio_extension(mime));
    let part = multipart::Part::bytes(audio)
      .file_name(file_name)
      .mime_str(mime)
      .map_err(|e| e.to_string())?;
    let form = multipart::Form::new()
      .text("model", self.transcribe_model.clone())
      .part("file", part);

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "politografisi-backend/0.1")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .multipart(form).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or_else(|| body);
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: TranscriptionResponse = res.json().await.map_err(|e| e.to_string())?;
    info!(elapsed = ?start.elapsed(), transcript_len = body.text.len(), "Transcription finished");
    Ok(body.text.trim().to_string())
  }
}

fn audio_extension(mime: &str) -> &'static str {
  match mime {
    "audio/mpeg" | "audio/mp3" => "mp3",
    "audio/wav" | "audio/x-wav" => "wav",
    "audio/mp4" | "audio/m4a" | "audio/x-m4a" => "m4a",
    "audio/ogg" => "ogg",
    _ => "webm",
  }
}

// --- API DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct TranscriptionResponse { text: String }

/// Try to extract a clean error message from an OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
