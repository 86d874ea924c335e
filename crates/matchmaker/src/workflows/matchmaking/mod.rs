//! Adaptive matchmaking quiz: asks trait-bearing questions, scores the candidate pool
//! against the accumulated answers, prunes it, and finally reveals a single pick.
//!
//! State lives in [`Session`] and only changes through [`reduce`]; the free functions
//! [`next_question`], [`score`], [`prune`], [`confidence`] and [`explain`] are pure
//! selectors over that state.

mod bank;
mod confidence;
pub mod domain;
mod engine;
mod filter;
mod narrative;
mod pacing;
mod phrases;
mod scoring;
mod selector;
mod session;

#[cfg(test)]
mod tests;

pub use bank::{
    QuestionBank, QuestionBankError, HOBBYIST, PROFESSIONAL, PROFILING_QUESTION_ID,
    STANDARD_BANK_VERSION,
};
pub use confidence::confidence;
pub use domain::{
    AnswerRecord, Candidate, CandidateId, EngineError, Phase, ProfileTag, Question, QuestionKind,
    TraitMapping,
};
pub use engine::MatchmakingEngine;
pub use filter::prune;
pub use narrative::explain;
pub use pacing::ThinkingPause;
pub use phrases::{PhraseProvider, SeededPhrases, THINKING_PHRASES};
pub use scoring::{score, score_pool, CandidateScore, MatchedTrait, ScoringPass};
pub use selector::{next_question, LARGE_POOL_THRESHOLD};
pub use session::{reduce, Reveal, Session, SessionEvent, MAX_QUESTIONS};
