use std::sync::{Arc, Mutex};

use crate::workflows::catalog::{CandidateCatalog, CatalogError, StaticCatalog};
use crate::workflows::matchmaking::domain::{
    Candidate, ProfileTag, Question, QuestionKind, TraitMapping,
};
use crate::workflows::matchmaking::{MatchmakingEngine, PhraseProvider, QuestionBank};

pub(super) const PROFILE: &str = "profile";

pub(super) fn profiling_question() -> Question {
    Question {
        id: PROFILE.to_string(),
        text: "How do you work?".to_string(),
        options: vec!["professional".to_string(), "hobbyist".to_string()],
        kind: QuestionKind::Behavioral,
        applicable_profiles: Vec::new(),
        weight: 1.0,
        mappings: Vec::new(),
    }
}

/// Yes/no question whose "yes" answer targets `indication`.
pub(super) fn yes_no(id: &str, indication: &str, weight: f64) -> Question {
    Question {
        id: id.to_string(),
        text: format!("{id}?"),
        options: vec!["yes".to_string(), "no".to_string()],
        kind: QuestionKind::Lifestyle,
        applicable_profiles: Vec::new(),
        weight,
        mappings: vec![TraitMapping {
            answer_value: "yes".to_string(),
            target_indications: vec![indication.to_string()],
            target_technologies: Vec::new(),
            behavioral_tag: format!("{id} trait"),
            contribution: 1.0,
        }],
    }
}

pub(super) fn gated(mut question: Question, profile: &str) -> Question {
    question.applicable_profiles = vec![ProfileTag::new(profile)];
    question
}

pub(super) fn bank_with(questions: Vec<Question>) -> Arc<QuestionBank> {
    let mut all = vec![profiling_question()];
    all.extend(questions);
    Arc::new(QuestionBank::new("test", PROFILE, all).expect("valid test bank"))
}

/// `count` follow-up questions that all target "acne", with decreasing weights.
pub(super) fn acne_bank(count: usize) -> Arc<QuestionBank> {
    bank_with(
        (0..count)
            .map(|index| yes_no(&format!("q{index:02}"), "acne", (count - index) as f64))
            .collect(),
    )
}

pub(super) fn acne_pool(size: usize) -> Vec<Candidate> {
    (0..size)
        .map(|index| {
            Candidate::new(
                format!("c{index}"),
                format!("Candidate {index}"),
                "Acne and scars",
                "led",
            )
        })
        .collect()
}

pub(super) struct FixedPhrase(pub(super) &'static str);

impl PhraseProvider for FixedPhrase {
    fn thinking_phrase(&mut self) -> &'static str {
        self.0
    }
}

pub(super) type TestEngine<C> = MatchmakingEngine<C, FixedPhrase>;

pub(super) fn engine(
    bank: Arc<QuestionBank>,
    candidates: Vec<Candidate>,
) -> TestEngine<StaticCatalog> {
    MatchmakingEngine::new(bank, StaticCatalog::new(candidates), FixedPhrase("Thinking"))
        .expect("engine starts")
}

/// Answer the current question with `value` until it no longer applies.
pub(super) fn answer_current<C: CandidateCatalog>(engine: &mut TestEngine<C>, value: &str) {
    let id = engine
        .current_question()
        .expect("a question is pending")
        .id
        .clone();
    engine.answer(&id, value).expect("answer accepted");
}

/// Catalog whose contents can be swapped between reads.
#[derive(Clone, Default)]
pub(super) struct SwitchableCatalog {
    pub(super) candidates: Arc<Mutex<Vec<Candidate>>>,
}

impl SwitchableCatalog {
    pub(super) fn replace(&self, candidates: Vec<Candidate>) {
        *self.candidates.lock().expect("catalog mutex poisoned") = candidates;
    }
}

impl CandidateCatalog for SwitchableCatalog {
    fn eligible_candidates(&self) -> Result<Vec<Candidate>, CatalogError> {
        Ok(self
            .candidates
            .lock()
            .expect("catalog mutex poisoned")
            .iter()
            .filter(|candidate| candidate.eligible)
            .cloned()
            .collect())
    }
}
