use super::bank::QuestionBank;
use super::confidence::confidence;
use super::domain::{Candidate, CandidateId, EngineError, Phase, ProfileTag, Question};
use super::filter::prune;
use super::narrative::explain;
use super::scoring::score_pool;
use super::selector::next_question;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Questions after which the session moves on regardless of confidence.
pub const MAX_QUESTIONS: usize = 12;
/// Confidence needed, together with a small pool, to attempt a reveal early.
pub const ATTEMPT_CONFIDENCE: f64 = 75.0;
/// Pool size at or below which an early attempt is allowed.
pub const ATTEMPT_POOL: usize = 2;
/// Minimum questions asked before an early attempt is allowed.
pub const ATTEMPT_MIN_QUESTIONS: usize = 6;

/// Inputs accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Answer { question_id: String, value: String },
    AttemptReveal,
}

/// Final pick together with its rationale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reveal {
    pub candidate: Candidate,
    pub explanation: String,
    pub confidence: f64,
    pub attempts: u32,
    pub insights: Vec<String>,
}

/// Complete state of one matchmaking run. Replaced wholesale on every event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    profile: Option<ProfileTag>,
    total_eligible: usize,
    active_candidates: Vec<Candidate>,
    scores: BTreeMap<CandidateId, f64>,
    asked_question_ids: Vec<String>,
    answers: BTreeMap<String, String>,
    phase: Phase,
    attempts: u32,
    confidence: f64,
    insights: Vec<String>,
    final_pick: Option<Candidate>,
    explanation: Option<String>,
}

impl Session {
    /// Fresh session over an already eligibility-filtered pool.
    pub fn new(candidates: Vec<Candidate>) -> Result<Self, EngineError> {
        if candidates.is_empty() {
            return Err(EngineError::EmptyCandidatePool);
        }

        let total = candidates.len();
        let scores = candidates
            .iter()
            .map(|candidate| (candidate.id.clone(), 0.0))
            .collect();

        Ok(Self {
            profile: None,
            total_eligible: total,
            active_candidates: candidates,
            scores,
            asked_question_ids: Vec::new(),
            answers: BTreeMap::new(),
            phase: Phase::Profiling,
            attempts: 0,
            confidence: confidence(total, total, 0),
            insights: Vec::new(),
            final_pick: None,
            explanation: None,
        })
    }

    pub fn profile(&self) -> Option<&ProfileTag> {
        self.profile.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total_eligible(&self) -> usize {
        self.total_eligible
    }

    pub fn active_candidates(&self) -> &[Candidate] {
        &self.active_candidates
    }

    pub fn scores(&self) -> &BTreeMap<CandidateId, f64> {
        &self.scores
    }

    pub fn asked_question_ids(&self) -> &[String] {
        &self.asked_question_ids
    }

    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn insights(&self) -> &[String] {
        &self.insights
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn reveal(&self) -> Option<Reveal> {
        let candidate = self.final_pick.clone()?;
        let explanation = self.explanation.clone()?;
        Some(Reveal {
            candidate,
            explanation,
            confidence: self.confidence,
            attempts: self.attempts,
            insights: self.insights.clone(),
        })
    }

    /// The question a caller should present next, if any.
    pub fn current_question<'a>(&self, bank: &'a QuestionBank) -> Option<&'a Question> {
        match self.phase {
            Phase::Profiling | Phase::Questioning => next_question(
                bank,
                self.profile.as_ref(),
                &self.asked_question_ids,
                self.active_candidates.len(),
            ),
            Phase::Attempting | Phase::Revealing => None,
        }
    }

    /// Answers in the order they were given.
    pub fn answer_log(&self) -> Vec<(&str, &str)> {
        self.asked_question_ids
            .iter()
            .filter_map(|id| {
                self.answers
                    .get(id)
                    .map(|value| (id.as_str(), value.as_str()))
            })
            .collect()
    }

    fn should_attempt(&self, bank: &QuestionBank) -> bool {
        let asked = self.asked_question_ids.len();
        let settled = self.confidence >= ATTEMPT_CONFIDENCE
            && self.active_candidates.len() <= ATTEMPT_POOL
            && asked >= ATTEMPT_MIN_QUESTIONS;

        settled || asked >= MAX_QUESTIONS || self.current_question(bank).is_none()
    }
}

/// Apply one event, returning the next session or an error. `session` is never modified.
pub fn reduce(
    session: &Session,
    event: &SessionEvent,
    bank: &QuestionBank,
) -> Result<Session, EngineError> {
    match event {
        SessionEvent::Answer { question_id, value } => {
            apply_answer(session, question_id, value, bank)
        }
        SessionEvent::AttemptReveal => apply_reveal(session, bank),
    }
}

fn apply_answer(
    session: &Session,
    question_id: &str,
    value: &str,
    bank: &QuestionBank,
) -> Result<Session, EngineError> {
    if !matches!(session.phase, Phase::Profiling | Phase::Questioning) {
        return Err(EngineError::InvalidTransition {
            operation: "answer",
            phase: session.phase,
        });
    }

    let current = session.current_question(bank);
    let question = match current {
        Some(question) if question.id == question_id => question,
        _ => {
            return Err(EngineError::UnknownQuestion {
                expected: current.map(|question| question.id.clone()),
                received: question_id.to_string(),
            })
        }
    };

    if !question.has_option(value) {
        return Err(EngineError::InvalidAnswerValue {
            question_id: question.id.clone(),
            value: value.to_string(),
        });
    }

    let mut next = session.clone();
    next.answers.insert(question.id.clone(), value.to_string());
    next.asked_question_ids.push(question.id.clone());

    if next.phase == Phase::Profiling {
        let profile = ProfileTag::new(value);
        info!(%profile, "profile established");
        next.profile = Some(profile);
        next.phase = Phase::Questioning;
        next.confidence = confidence(
            next.total_eligible,
            next.active_candidates.len(),
            next.asked_question_ids.len(),
        );
        return Ok(next);
    }

    let pass = score_pool(bank, &session.active_candidates, &next.answer_log());
    next.active_candidates = prune(&session.active_candidates, &pass.scores);
    next.scores = pass.scores;
    next.scores
        .retain(|id, _| next.active_candidates.iter().any(|c| &c.id == id));
    next.insights = pass.insights;
    next.confidence = confidence(
        next.total_eligible,
        next.active_candidates.len(),
        next.asked_question_ids.len(),
    );

    if next.should_attempt(bank) {
        info!(
            asked = next.asked_question_ids.len(),
            remaining = next.active_candidates.len(),
            confidence = next.confidence,
            "ready to attempt a reveal"
        );
        next.phase = Phase::Attempting;
    }

    Ok(next)
}

fn apply_reveal(session: &Session, bank: &QuestionBank) -> Result<Session, EngineError> {
    // questioning with nothing left to ask is a forced attempt
    let forced = session.phase == Phase::Questioning && session.current_question(bank).is_none();
    if session.phase != Phase::Attempting && !forced {
        return Err(EngineError::InvalidTransition {
            operation: "attempt a reveal",
            phase: session.phase,
        });
    }

    let top = session
        .active_candidates
        .first()
        .cloned()
        .ok_or(EngineError::EmptyCandidatePool)?;

    let mut next = session.clone();
    next.explanation = Some(explain(&top, &session.answers, session.profile.as_ref()));
    next.attempts += 1;
    next.phase = Phase::Revealing;
    info!(candidate = %top.id, attempts = next.attempts, "revealed recommendation");
    next.final_pick = Some(top);

    Ok(next)
}
