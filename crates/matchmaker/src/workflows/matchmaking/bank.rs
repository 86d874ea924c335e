use super::domain::{ProfileTag, Question, QuestionKind, TraitMapping};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

pub const STANDARD_BANK_VERSION: &str = "2024.2";
pub const PROFILING_QUESTION_ID: &str = "profile";
pub const PROFESSIONAL: &str = "professional";
pub const HOBBYIST: &str = "hobbyist";

/// Versioned catalog of questions with a single designated profiling entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    version: String,
    profiling_question_id: String,
    questions: Vec<Question>,
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionBankError {
    #[error("question bank is missing profiling question '{0}'")]
    MissingProfilingQuestion(String),
    #[error("question '{0}' appears more than once")]
    DuplicateQuestion(String),
    #[error("question '{0}' has no options")]
    NoOptions(String),
    #[error("question '{question_id}' weight must be positive, got {weight}")]
    NonPositiveWeight { question_id: String, weight: f64 },
    #[error("question '{question_id}' maps answer '{answer_value}' which is not one of its options")]
    UnknownMappingAnswer {
        question_id: String,
        answer_value: String,
    },
    #[error("invalid question bank document: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuestionBank {
    pub fn new(
        version: impl Into<String>,
        profiling_question_id: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, QuestionBankError> {
        let bank = Self {
            version: version.into(),
            profiling_question_id: profiling_question_id.into(),
            questions,
        };
        bank.validate()?;
        Ok(bank)
    }

    pub fn standard() -> Self {
        Self {
            version: STANDARD_BANK_VERSION.to_string(),
            profiling_question_id: PROFILING_QUESTION_ID.to_string(),
            questions: standard_questions(),
        }
    }

    /// Load a bank serialized as JSON and run the same checks as [`QuestionBank::new`].
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, QuestionBankError> {
        let bank: QuestionBank = serde_json::from_reader(reader)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn profiling_question(&self) -> Option<&Question> {
        self.question(&self.profiling_question_id)
    }

    pub fn is_profiling(&self, question_id: &str) -> bool {
        self.profiling_question_id == question_id
    }

    pub fn questions_for_profile<'a, 'p>(
        &'a self,
        profile: &'p ProfileTag,
    ) -> impl Iterator<Item = &'a Question> + 'p
    where
        'a: 'p,
    {
        self.questions
            .iter()
            .filter(move |question| !self.is_profiling(&question.id) && question.applies_to(profile))
    }

    fn validate(&self) -> Result<(), QuestionBankError> {
        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(QuestionBankError::DuplicateQuestion(question.id.clone()));
            }
            if question.options.is_empty() {
                return Err(QuestionBankError::NoOptions(question.id.clone()));
            }
            if !question.weight.is_finite() || question.weight <= 0.0 {
                return Err(QuestionBankError::NonPositiveWeight {
                    question_id: question.id.clone(),
                    weight: question.weight,
                });
            }
            if let Some(mapping) = question
                .mappings
                .iter()
                .find(|mapping| !question.has_option(&mapping.answer_value))
            {
                return Err(QuestionBankError::UnknownMappingAnswer {
                    question_id: question.id.clone(),
                    answer_value: mapping.answer_value.clone(),
                });
            }
        }

        if self.profiling_question().is_none() {
            return Err(QuestionBankError::MissingProfilingQuestion(
                self.profiling_question_id.clone(),
            ));
        }

        Ok(())
    }
}

fn mapping(
    answer_value: &str,
    target_indications: &[&str],
    target_technologies: &[&str],
    behavioral_tag: &str,
    contribution: f64,
) -> TraitMapping {
    TraitMapping {
        answer_value: answer_value.to_string(),
        target_indications: target_indications.iter().map(|s| s.to_string()).collect(),
        target_technologies: target_technologies.iter().map(|s| s.to_string()).collect(),
        behavioral_tag: behavioral_tag.to_string(),
        contribution,
    }
}

fn question(
    id: &str,
    text: &str,
    kind: QuestionKind,
    profiles: &[&str],
    weight: f64,
    options: &[&str],
    mappings: Vec<TraitMapping>,
) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        kind,
        applicable_profiles: profiles.iter().map(|p| ProfileTag::new(*p)).collect(),
        weight,
        mappings,
    }
}

fn standard_questions() -> Vec<Question> {
    vec![
        question(
            PROFILING_QUESTION_ID,
            "How do you relate to aesthetic equipment day to day?",
            QuestionKind::Behavioral,
            &[],
            1.0,
            &[PROFESSIONAL, HOBBYIST],
            vec![
                mapping(PROFESSIONAL, &[], &["hifu", "laser"], "clinical ambition", 1.0),
                mapping(HOBBYIST, &[], &["led", "radiofrequency"], "self-care ritual", 1.0),
            ],
        ),
        question(
            "mirror",
            "When you look in the mirror in the morning, what do you notice first?",
            QuestionKind::Psychological,
            &[],
            3.0,
            &[
                "every small line and detail",
                "the overall glow of my skin",
                "how my clothes fit",
                "I avoid mirrors",
            ],
            vec![
                mapping(
                    "every small line and detail",
                    &["wrinkles", "rejuvenation"],
                    &["microneedling"],
                    "analytical perfectionist",
                    3.0,
                ),
                mapping(
                    "the overall glow of my skin",
                    &["pigmentation", "spots", "melasma"],
                    &["ipl", "led"],
                    "radiance seeker",
                    3.0,
                ),
                mapping(
                    "how my clothes fit",
                    &["localized fat", "body contouring", "cellulite"],
                    &["cryolipolysis"],
                    "silhouette focused",
                    3.0,
                ),
                mapping("I avoid mirrors", &["acne", "scars"], &["led"], "quiet self-critic", 2.0),
            ],
        ),
        question(
            "childhood",
            "Which childhood memory feels closest to you?",
            QuestionKind::Nostalgic,
            &[],
            2.0,
            &[
                "building things piece by piece",
                "summer days at the beach",
                "dancing and moving all day",
                "quiet afternoons reading",
            ],
            vec![
                mapping(
                    "building things piece by piece",
                    &[],
                    &["laser", "microneedling"],
                    "meticulous builder",
                    2.0,
                ),
                mapping(
                    "summer days at the beach",
                    &["pigmentation", "spots", "stretch marks"],
                    &[],
                    "sun chaser",
                    2.0,
                ),
                mapping(
                    "dancing and moving all day",
                    &["cellulite", "flaccidity"],
                    &["electrostimulation", "shockwave"],
                    "kinetic spirit",
                    2.0,
                ),
                mapping(
                    "quiet afternoons reading",
                    &["rejuvenation"],
                    &["led"],
                    "contemplative",
                    1.0,
                ),
            ],
        ),
        question(
            "weekend",
            "How does your ideal weekend look?",
            QuestionKind::Lifestyle,
            &[],
            1.5,
            &[
                "training for a race",
                "a spa retreat",
                "catching up on work",
                "outdoors with family",
            ],
            vec![
                mapping(
                    "training for a race",
                    &["body contouring"],
                    &["electrostimulation"],
                    "performance driven",
                    2.0,
                ),
                mapping(
                    "a spa retreat",
                    &["rejuvenation"],
                    &["radiofrequency", "led"],
                    "indulgent restorer",
                    2.0,
                ),
                mapping(
                    "catching up on work",
                    &[],
                    &["hifu", "ultrasound"],
                    "efficiency hunter",
                    2.0,
                ),
                mapping(
                    "outdoors with family",
                    &["pigmentation", "hair removal"],
                    &["ipl"],
                    "practical nurturer",
                    2.0,
                ),
            ],
        ),
        question(
            "regret",
            "What would you regret most a year from now?",
            QuestionKind::Emotional,
            &[],
            2.5,
            &[
                "not taking a bold step",
                "letting time show on my face",
                "hiding my body in summer",
                "not caring for my skin sooner",
            ],
            vec![
                mapping(
                    "not taking a bold step",
                    &[],
                    &["hifu", "laser"],
                    "bold transformer",
                    3.0,
                ),
                mapping(
                    "letting time show on my face",
                    &["rejuvenation", "wrinkles", "flaccidity"],
                    &[],
                    "time defier",
                    3.0,
                ),
                mapping(
                    "hiding my body in summer",
                    &["localized fat", "cellulite", "stretch marks"],
                    &[],
                    "confidence seeker",
                    3.0,
                ),
                mapping(
                    "not caring for my skin sooner",
                    &["acne", "melasma", "pigmentation"],
                    &[],
                    "late bloomer",
                    2.0,
                ),
            ],
        ),
        question(
            "compliment",
            "Which compliment would touch you the most?",
            QuestionKind::Emotional,
            &[],
            2.0,
            &["you look rested", "your skin is flawless", "you look so fit"],
            vec![
                mapping(
                    "you look rested",
                    &["rejuvenation", "flaccidity"],
                    &["radiofrequency"],
                    "serenity craver",
                    2.0,
                ),
                mapping(
                    "your skin is flawless",
                    &["acne", "scars", "spots"],
                    &["laser", "ipl"],
                    "flawless ideal",
                    2.0,
                ),
                mapping(
                    "you look so fit",
                    &["body contouring", "localized fat"],
                    &["cryolipolysis", "shockwave"],
                    "athletic pride",
                    2.0,
                ),
            ],
        ),
        question(
            "risk",
            "A new protocol promises great results but few studies back it. What do you do?",
            QuestionKind::Behavioral,
            &[PROFESSIONAL],
            2.0,
            &[
                "test it myself first",
                "wait for more evidence",
                "ask peers what they think",
            ],
            vec![
                mapping("test it myself first", &[], &["laser", "hifu"], "pioneer", 2.0),
                mapping(
                    "wait for more evidence",
                    &[],
                    &["radiofrequency", "led"],
                    "evidence guardian",
                    2.0,
                ),
                mapping(
                    "ask peers what they think",
                    &[],
                    &["ipl", "microneedling"],
                    "community validator",
                    1.5,
                ),
            ],
        ),
        question(
            "clinic_day",
            "What fills most of your clinic agenda?",
            QuestionKind::Lifestyle,
            &[PROFESSIONAL],
            1.5,
            &[
                "facial treatments",
                "body treatments",
                "hair removal",
                "a bit of everything",
            ],
            vec![
                mapping(
                    "facial treatments",
                    &["rejuvenation", "wrinkles", "acne", "melasma"],
                    &[],
                    "facial artisan",
                    2.0,
                ),
                mapping(
                    "body treatments",
                    &["cellulite", "localized fat", "flaccidity", "stretch marks"],
                    &[],
                    "body sculptor",
                    2.0,
                ),
                mapping("hair removal", &["hair removal"], &[], "high-volume operator", 2.0),
                mapping(
                    "a bit of everything",
                    &[],
                    &["radiofrequency", "ultrasound"],
                    "versatile generalist",
                    1.0,
                ),
            ],
        ),
        question(
            "investment",
            "How do you feel about a large equipment investment?",
            QuestionKind::Psychological,
            &[PROFESSIONAL],
            1.0,
            &["excited, it means growth", "cautious, it must pay back fast"],
            vec![
                mapping(
                    "excited, it means growth",
                    &[],
                    &["hifu", "laser"],
                    "growth strategist",
                    2.0,
                ),
                mapping(
                    "cautious, it must pay back fast",
                    &[],
                    &["led", "radiofrequency", "electrostimulation"],
                    "prudent planner",
                    2.0,
                ),
            ],
        ),
        question(
            "patient_feedback",
            "Which patient reaction stays with you the longest?",
            QuestionKind::Emotional,
            &[PROFESSIONAL],
            2.0,
            &[
                "tears of joy at the mirror",
                "a thank-you for zero pain",
                "a referral to a friend",
            ],
            vec![
                mapping(
                    "tears of joy at the mirror",
                    &["rejuvenation", "flaccidity"],
                    &[],
                    "transformation witness",
                    2.0,
                ),
                mapping(
                    "a thank-you for zero pain",
                    &[],
                    &["led", "cryolipolysis", "radiofrequency"],
                    "comfort guardian",
                    2.0,
                ),
                mapping(
                    "a referral to a friend",
                    &["hair removal", "spots"],
                    &[],
                    "reputation builder",
                    1.5,
                ),
            ],
        ),
        question(
            "routine",
            "How does your skincare routine look?",
            QuestionKind::Behavioral,
            &[HOBBYIST],
            2.0,
            &[
                "ten steps every night",
                "sunscreen and go",
                "whatever is nearby",
            ],
            vec![
                mapping(
                    "ten steps every night",
                    &["rejuvenation", "wrinkles"],
                    &["microneedling", "led"],
                    "ritualist",
                    2.0,
                ),
                mapping(
                    "sunscreen and go",
                    &["pigmentation", "spots"],
                    &["ipl"],
                    "minimalist",
                    2.0,
                ),
                mapping("whatever is nearby", &["acne"], &["led"], "spontaneous", 1.0),
            ],
        ),
        question(
            "gift",
            "Which gift from the past do you still remember?",
            QuestionKind::Nostalgic,
            &[HOBBYIST],
            1.5,
            &["a first perfume", "a bicycle", "a camera"],
            vec![
                mapping(
                    "a first perfume",
                    &["rejuvenation"],
                    &["radiofrequency"],
                    "sensory romantic",
                    2.0,
                ),
                mapping(
                    "a bicycle",
                    &["cellulite", "body contouring"],
                    &["electrostimulation"],
                    "freedom seeker",
                    2.0,
                ),
                mapping(
                    "a camera",
                    &["spots", "pigmentation"],
                    &["ipl", "laser"],
                    "detail observer",
                    2.0,
                ),
            ],
        ),
        question(
            "home_time",
            "How much time can you dedicate to at-home sessions?",
            QuestionKind::Lifestyle,
            &[HOBBYIST],
            1.0,
            &["a few minutes a day", "one long session a week"],
            vec![
                mapping("a few minutes a day", &[], &["led"], "micro-habit builder", 2.0),
                mapping(
                    "one long session a week",
                    &[],
                    &["radiofrequency", "electrostimulation"],
                    "weekly devotee",
                    2.0,
                ),
            ],
        ),
        question(
            "social",
            "At a party, where are you usually found?",
            QuestionKind::Psychological,
            &[],
            1.0,
            &[
                "center of the room",
                "deep conversation in a corner",
                "helping in the kitchen",
            ],
            vec![
                mapping("center of the room", &[], &["hifu", "laser"], "spotlight lover", 1.0),
                mapping(
                    "deep conversation in a corner",
                    &["rejuvenation"],
                    &[],
                    "depth seeker",
                    1.0,
                ),
                mapping(
                    "helping in the kitchen",
                    &["hair removal"],
                    &["ipl"],
                    "caretaker",
                    1.0,
                ),
            ],
        ),
        question(
            "color",
            "Which color calms you the most?",
            QuestionKind::Psychological,
            &[],
            0.5,
            &["blue", "red", "green", "white"],
            vec![
                mapping("blue", &["acne"], &["led"], "calm analyst", 1.0),
                mapping("red", &["flaccidity"], &["radiofrequency"], "passionate energizer", 1.0),
                mapping("green", &["scars"], &["microneedling"], "renewal seeker", 1.0),
                mapping("white", &["hair removal", "spots"], &["laser"], "purist", 1.0),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_question(id: &str, options: &[&str]) -> Question {
        question(id, "?", QuestionKind::Behavioral, &[], 1.0, options, Vec::new())
    }

    #[test]
    fn standard_bank_passes_validation() {
        let bank = QuestionBank::standard();
        bank.validate().expect("standard bank is consistent");
        assert_eq!(bank.version(), STANDARD_BANK_VERSION);
        let profiling = bank.profiling_question().expect("profiling question present");
        assert_eq!(profiling.id, PROFILING_QUESTION_ID);
        assert_eq!(profiling.options, vec![PROFESSIONAL, HOBBYIST]);
    }

    #[test]
    fn standard_bank_offers_every_kind() {
        let bank = QuestionBank::standard();
        for kind in [
            QuestionKind::Behavioral,
            QuestionKind::Psychological,
            QuestionKind::Nostalgic,
            QuestionKind::Lifestyle,
            QuestionKind::Emotional,
        ] {
            assert!(
                bank.questions().iter().any(|question| question.kind == kind),
                "missing {} question",
                kind.label()
            );
        }
    }

    #[test]
    fn profile_gating_splits_follow_up_questions() {
        let bank = QuestionBank::standard();
        let professional = ProfileTag::new(PROFESSIONAL);
        let hobbyist = ProfileTag::new(HOBBYIST);

        let pro_ids: Vec<&str> = bank
            .questions_for_profile(&professional)
            .map(|question| question.id.as_str())
            .collect();
        let hobby_ids: Vec<&str> = bank
            .questions_for_profile(&hobbyist)
            .map(|question| question.id.as_str())
            .collect();

        assert!(pro_ids.contains(&"risk"));
        assert!(!hobby_ids.contains(&"risk"));
        assert!(hobby_ids.contains(&"routine"));
        assert!(pro_ids.contains(&"mirror") && hobby_ids.contains(&"mirror"));
        assert!(!pro_ids.contains(&PROFILING_QUESTION_ID));
    }

    #[test]
    fn rejects_mapping_outside_options() {
        let mut broken = tiny_question("q1", &["yes", "no"]);
        broken.mappings.push(mapping("maybe", &["acne"], &[], "hesitant", 1.0));
        let profiling = tiny_question("p", &["any"]);

        let error = QuestionBank::new("test", "p", vec![profiling, broken])
            .expect_err("mapping must reference an option");
        assert!(matches!(
            error,
            QuestionBankError::UnknownMappingAnswer { ref answer_value, .. } if answer_value == "maybe"
        ));
    }

    #[test]
    fn rejects_missing_profiling_question_and_duplicates() {
        let error = QuestionBank::new("test", "p", vec![tiny_question("q1", &["a"])])
            .expect_err("profiling question required");
        assert!(matches!(error, QuestionBankError::MissingProfilingQuestion(_)));

        let error = QuestionBank::new(
            "test",
            "p",
            vec![tiny_question("p", &["a"]), tiny_question("p", &["b"])],
        )
        .expect_err("duplicate ids rejected");
        assert!(matches!(error, QuestionBankError::DuplicateQuestion(_)));
    }

    #[test]
    fn rejects_non_positive_weight() {
        let mut zero = tiny_question("q1", &["a"]);
        zero.weight = 0.0;
        let error = QuestionBank::new("test", "p", vec![tiny_question("p", &["x"]), zero])
            .expect_err("weight must be positive");
        assert!(matches!(error, QuestionBankError::NonPositiveWeight { .. }));
    }

    #[test]
    fn loads_bank_from_json() {
        let json = serde_json::to_string(&QuestionBank::standard()).expect("serialize bank");
        let bank = QuestionBank::from_json_reader(json.as_bytes()).expect("bank round trips");
        assert_eq!(bank.questions().len(), QuestionBank::standard().questions().len());

        let error = QuestionBank::from_json_reader("{\"version\": 1}".as_bytes())
            .expect_err("malformed document");
        assert!(matches!(error, QuestionBankError::Json(_)));
    }
}
