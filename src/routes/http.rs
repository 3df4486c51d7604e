//! HTTP endpoint handlers. These are thin wrappers that forward to the
//! assembler and grading logic. Each handler is instrumented and logs
//! parameters and basic result info.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, instrument, warn};

use crate::assembler::generate_exam;
use crate::grading::{grade_essay, grade_speaking, GradingError};
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_exam(State(state): State<Arc<AppState>>) -> Response {
    let mut rng = StdRng::from_entropy();
    match generate_exam(&state.store, &mut rng).await {
        Ok(package) => {
            info!(target: "exam", theory = package.theory.len(), "HTTP exam served");
            Json(package).into_response()
        }
        Err(e) => {
            error!(target: "exam", error = %e, "Exam generation failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorOut {
                    message: "Exam generation failed.".into(),
                }),
            )
                .into_response()
        }
    }
}

#[instrument(level = "info", skip(state, body), fields(peer = %addr.ip(), answer_len = body.answer.len()))]
pub async fn http_post_grade_essay(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<GradeEssayIn>,
) -> Response {
    if !state.grade_limiter.check(&addr.ip().to_string()) {
        warn!(target: "grading", peer = %addr.ip(), "Essay grading rate-limited");
        return too_many_requests();
    }

    let outcome = grade_essay(&state, &body.question, &body.model_answer, &body.answer).await;
    info!(
        target: "grading",
        correct = outcome.correct,
        score = %format!("{:.1}", outcome.score),
        origin = outcome.origin,
        "HTTP essay graded"
    );
    Json(GradeOut {
        correct: outcome.correct,
        score: outcome.score,
        explanation: outcome.explanation,
        origin: outcome.origin,
    })
    .into_response()
}

#[instrument(level = "info", skip(state, body), fields(peer = %addr.ip(), audio_b64_len = body.audio_base64.len()))]
pub async fn http_post_grade_speaking(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<GradeSpeakingIn>,
) -> Response {
    if !state.grade_limiter.check(&addr.ip().to_string()) {
        warn!(target: "grading", peer = %addr.ip(), "Speaking grading rate-limited");
        return too_many_requests();
    }

    match grade_speaking(
        &state,
        &body.audio_base64,
        &body.mime,
        &body.question,
        &body.model_answer,
    )
    .await
    {
        Ok((outcome, transcript)) => {
            info!(
                target: "grading",
                correct = outcome.correct,
                score = %format!("{:.1}", outcome.score),
                origin = outcome.origin,
                "HTTP speaking graded"
            );
            Json(GradeSpeakingOut {
                correct: outcome.correct,
                score: outcome.score,
                explanation: outcome.explanation,
                origin: outcome.origin,
                transcript,
            })
            .into_response()
        }
        Err(e) => {
            error!(target: "grading", error = %e, "Speaking grading failed");
            let status = match &e {
                GradingError::BadAudio(_) => StatusCode::BAD_REQUEST,
                GradingError::TranscriptionUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                GradingError::TranscriptionFailed(_) => StatusCode::BAD_GATEWAY,
            };
            (status, Json(ErrorOut { message: e.to_string() })).into_response()
        }
    }
}

fn too_many_requests() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorOut {
            message: "Too many grading requests. Try again in a minute.".into(),
        }),
    )
        .into_response()
}
