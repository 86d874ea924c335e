use std::collections::BTreeMap;
use std::sync::Arc;

use super::bank::QuestionBank;
use super::domain::{AnswerRecord, Candidate, CandidateId, EngineError, Phase, Question};
use super::phrases::PhraseProvider;
use super::session::{reduce, Reveal, Session, SessionEvent};
use crate::workflows::catalog::CandidateCatalog;

/// Stateful facade composing the question bank, candidate catalog, and session reducer.
///
/// Every mutating call computes a complete replacement session first and swaps it in
/// only on success, so a failed call leaves the visible state untouched.
pub struct MatchmakingEngine<C, P> {
    bank: Arc<QuestionBank>,
    catalog: C,
    phrases: P,
    session: Session,
}

impl<C, P> MatchmakingEngine<C, P>
where
    C: CandidateCatalog,
    P: PhraseProvider,
{
    /// Pull the eligible pool and start a profiling session. Fails fast on an empty pool.
    pub fn new(bank: Arc<QuestionBank>, catalog: C, phrases: P) -> Result<Self, EngineError> {
        let session = Session::new(catalog.eligible_candidates()?)?;
        tracing::info!(
            bank_version = bank.version(),
            candidates = session.total_eligible(),
            "matchmaking session started"
        );

        Ok(Self {
            bank,
            catalog,
            phrases,
            session,
        })
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question(&self.bank)
    }

    pub fn answer(&mut self, question_id: &str, value: &str) -> Result<Phase, EngineError> {
        self.dispatch(SessionEvent::Answer {
            question_id: question_id.to_string(),
            value: value.to_string(),
        })?;
        Ok(self.session.phase())
    }

    pub fn attempt_reveal(&mut self) -> Result<Reveal, EngineError> {
        self.dispatch(SessionEvent::AttemptReveal)?;
        self.session
            .reveal()
            .ok_or(EngineError::InvalidTransition {
                operation: "attempt a reveal",
                phase: self.session.phase(),
            })
    }

    /// Replay an answer log in order, stopping at the first rejected answer.
    pub fn replay<'a, I>(&mut self, answers: I) -> Result<Phase, EngineError>
    where
        I: IntoIterator<Item = &'a AnswerRecord>,
    {
        for record in answers {
            self.answer(&record.question_id, &record.value)?;
        }
        Ok(self.session.phase())
    }

    /// Discard the session and start over with a freshly read candidate pool.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        let session = Session::new(self.catalog.eligible_candidates()?)?;
        tracing::info!(candidates = session.total_eligible(), "matchmaking session reset");
        self.session = session;
        Ok(())
    }

    pub fn remaining_candidates(&self) -> &[Candidate] {
        self.session.active_candidates()
    }

    pub fn scores(&self) -> &BTreeMap<CandidateId, f64> {
        self.session.scores()
    }

    pub fn answers(&self) -> &BTreeMap<String, String> {
        self.session.answers()
    }

    pub fn confidence(&self) -> f64 {
        self.session.confidence()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn insights(&self) -> &[String] {
        self.session.insights()
    }

    pub fn thinking_phrase(&mut self) -> &'static str {
        self.phrases.thinking_phrase()
    }

    fn dispatch(&mut self, event: SessionEvent) -> Result<(), EngineError> {
        let next = reduce(&self.session, &event, &self.bank).map_err(|err| {
            tracing::debug!(error = %err, phase = %self.session.phase(), "event rejected");
            err
        })?;
        self.session = next;
        Ok(())
    }
}
