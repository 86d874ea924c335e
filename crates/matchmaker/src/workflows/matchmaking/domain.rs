use crate::workflows::catalog::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for catalog candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse user category established by the profiling question.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileTag(pub String);

impl ProfileTag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Equipment record supplied by the external catalog. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub indications: String,
    pub technology: String,
    #[serde(default = "default_eligible")]
    pub eligible: bool,
}

fn default_eligible() -> bool {
    true
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        indications: impl Into<String>,
        technology: impl Into<String>,
    ) -> Self {
        Self {
            id: CandidateId(id.into()),
            name: name.into(),
            indications: indications.into(),
            technology: technology.into(),
            eligible: true,
        }
    }
}

/// Classification used by the selection heuristics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Behavioral,
    Psychological,
    Nostalgic,
    Lifestyle,
    Emotional,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Behavioral => "Behavioral",
            Self::Psychological => "Psychological",
            Self::Nostalgic => "Nostalgic",
            Self::Lifestyle => "Lifestyle",
            Self::Emotional => "Emotional",
        }
    }
}

/// Rule linking one answer value to target attributes, a behavioral tag, and a contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitMapping {
    pub answer_value: String,
    #[serde(default)]
    pub target_indications: Vec<String>,
    #[serde(default)]
    pub target_technologies: Vec<String>,
    pub behavioral_tag: String,
    pub contribution: f64,
}

/// A single prompt from the question bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub kind: QuestionKind,
    /// Empty means the question is universal.
    #[serde(default)]
    pub applicable_profiles: Vec<ProfileTag>,
    pub weight: f64,
    #[serde(default)]
    pub mappings: Vec<TraitMapping>,
}

impl Question {
    pub fn is_universal(&self) -> bool {
        self.applicable_profiles.is_empty()
    }

    pub fn applies_to(&self, profile: &ProfileTag) -> bool {
        self.is_universal() || self.applicable_profiles.contains(profile)
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option == value)
    }

    pub fn mappings_for<'a>(&'a self, value: &'a str) -> impl Iterator<Item = &'a TraitMapping> {
        self.mappings
            .iter()
            .filter(move |mapping| mapping.answer_value == value)
    }
}

/// Lifecycle of a matchmaking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Profiling,
    Questioning,
    Attempting,
    Revealing,
}

impl Phase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Profiling => "profiling",
            Self::Questioning => "questioning",
            Self::Attempting => "attempting",
            Self::Revealing => "revealing",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recorded response to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub value: String,
}

impl AnswerRecord {
    pub fn new(question_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            value: value.into(),
        }
    }
}

/// Errors surfaced to callers of the matchmaking engine. All are recoverable and
/// leave the session untouched.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("cannot {operation} while the session is {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: Phase,
    },
    #[error("question '{received}' is not the current question (expected {})", .expected.as_deref().unwrap_or("none"))]
    UnknownQuestion {
        expected: Option<String>,
        received: String,
    },
    #[error("'{value}' is not an option of question '{question_id}'")]
    InvalidAnswerValue { question_id: String, value: String },
    #[error("candidate catalog supplied no eligible candidates")]
    EmptyCandidatePool,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
