//! Public request/response structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.
//!
//! The exam package itself (`domain::ExamPackage`) is serialized directly;
//! its shape is the public contract with the exam runner.

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[derive(Deserialize)]
pub struct GradeEssayIn {
    #[serde(default)]
    pub question: String,
    #[serde(rename = "modelAnswer")]
    pub model_answer: String,
    pub answer: String,
}

#[derive(Serialize)]
pub struct GradeOut {
    pub correct: bool,
    pub score: f32,
    pub explanation: String,
    pub origin: &'static str,
}

#[derive(Deserialize)]
pub struct GradeSpeakingIn {
    #[serde(rename = "audioBase64")]
    pub audio_base64: String,
    pub mime: String,
    #[serde(default)]
    pub question: String,
    #[serde(default, rename = "modelAnswer")]
    pub model_answer: String,
}

#[derive(Serialize)]
pub struct GradeSpeakingOut {
    pub correct: bool,
    pub score: f32,
    pub explanation: String,
    pub origin: &'static str,
    pub transcript: String,
}
