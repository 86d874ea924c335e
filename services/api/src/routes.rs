use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use matchmaker::error::AppError;
use matchmaker::workflows::matchmaking::{
    AnswerRecord, Candidate, CandidateId, Phase, ProfileTag, Question, Reveal,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub(crate) struct ReplayRequest {
    pub(crate) answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub(crate) reveal: bool,
}

/// Read-only projection of a replayed session.
#[derive(Debug, Serialize)]
pub(crate) struct SessionView {
    pub(crate) phase: Phase,
    pub(crate) profile: Option<ProfileTag>,
    pub(crate) questions_asked: usize,
    pub(crate) current_question: Option<Question>,
    pub(crate) remaining_candidates: Vec<Candidate>,
    pub(crate) scores: BTreeMap<CandidateId, f64>,
    pub(crate) confidence: f64,
    pub(crate) insights: Vec<String>,
    pub(crate) thinking: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reveal: Option<Reveal>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BankView {
    pub(crate) version: String,
    pub(crate) questions: Vec<Question>,
}

pub(crate) fn quiz_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/quiz/bank", get(bank_endpoint))
        .route("/api/v1/quiz/replay", post(replay_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn bank_endpoint(Extension(state): Extension<AppState>) -> Json<BankView> {
    Json(BankView {
        version: state.bank.version().to_string(),
        questions: state.bank.questions().to_vec(),
    })
}

/// Replays an answer log into a fresh session. Nothing is stored between calls.
pub(crate) async fn replay_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ReplayRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut engine = state.engine()?;
    engine.replay(&payload.answers)?;

    let reveal = if payload.reveal {
        Some(engine.attempt_reveal()?)
    } else {
        None
    };

    tracing::debug!(
        answers = payload.answers.len(),
        phase = %engine.phase(),
        "replayed quiz session"
    );

    Ok(Json(SessionView {
        phase: engine.phase(),
        profile: engine.session().profile().cloned(),
        questions_asked: engine.session().asked_question_ids().len(),
        current_question: engine.current_question().cloned(),
        remaining_candidates: engine.remaining_candidates().to_vec(),
        scores: engine.scores().clone(),
        confidence: engine.confidence(),
        insights: engine.insights().to_vec(),
        thinking: engine.thinking_phrase(),
        reveal,
    }))
}
