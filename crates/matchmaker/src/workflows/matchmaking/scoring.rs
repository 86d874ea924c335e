use super::bank::QuestionBank;
use super::domain::{Candidate, CandidateId, TraitMapping};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One matched mapping, kept so a score can be audited after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedTrait {
    pub question_id: String,
    pub behavioral_tag: String,
    pub points: f64,
}

/// Score of a single candidate against the full answer history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub candidate_id: CandidateId,
    pub total: f64,
    pub matched: Vec<MatchedTrait>,
}

/// Output of one full scoring pass over the active pool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringPass {
    pub scores: BTreeMap<CandidateId, f64>,
    pub insights: Vec<String>,
}

/// Score `candidate` against every recorded answer.
///
/// Each mapping is considered on its own: when two mappings of the same answer both
/// hit, both contribute.
pub fn score<'a, I>(bank: &QuestionBank, candidate: &Candidate, answers: I) -> CandidateScore
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let indications = candidate.indications.to_lowercase();
    let technology = candidate.technology.to_lowercase();
    let mut total = 0.0;
    let mut matched = Vec::new();

    for (question_id, value) in answers {
        let Some(question) = bank.question(question_id) else {
            continue;
        };

        for mapping in question.mappings_for(value) {
            if mapping_matches(mapping, &indications, &technology) {
                let points = mapping.contribution * question.weight;
                total += points;
                matched.push(MatchedTrait {
                    question_id: question.id.clone(),
                    behavioral_tag: mapping.behavioral_tag.clone(),
                    points,
                });
            }
        }
    }

    CandidateScore {
        candidate_id: candidate.id.clone(),
        total,
        matched,
    }
}

/// Recompute scores and insights for the whole pool from the answer log.
///
/// Every mapping that hits a candidate adds its tag to the insights, candidate by
/// candidate and in answer order, so a trait shared by several candidates repeats.
pub fn score_pool<'a>(
    bank: &QuestionBank,
    candidates: &[Candidate],
    answers: &[(&'a str, &'a str)],
) -> ScoringPass {
    let mut pass = ScoringPass::default();

    for candidate in candidates {
        let outcome = score(bank, candidate, answers.iter().copied());
        tracing::debug!(
            candidate = %candidate.id,
            score = outcome.total,
            matched = outcome.matched.len(),
            "scored candidate"
        );
        pass.insights.extend(
            outcome
                .matched
                .into_iter()
                .map(|matched| matched.behavioral_tag),
        );
        pass.scores.insert(outcome.candidate_id, outcome.total);
    }

    pass
}

fn mapping_matches(mapping: &TraitMapping, indications: &str, technology: &str) -> bool {
    contains_any(indications, &mapping.target_indications)
        || contains_any(technology, &mapping.target_technologies)
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| {
        let needle = needle.trim();
        !needle.is_empty() && haystack.contains(&needle.to_lowercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::matchmaking::domain::{Question, QuestionKind};

    fn bank() -> QuestionBank {
        let profiling = Question {
            id: "p".to_string(),
            text: "Profile?".to_string(),
            options: vec!["pro".to_string()],
            kind: QuestionKind::Behavioral,
            applicable_profiles: Vec::new(),
            weight: 1.0,
            mappings: Vec::new(),
        };
        let skin = Question {
            id: "skin".to_string(),
            text: "Skin?".to_string(),
            options: vec!["tired".to_string(), "fine".to_string()],
            kind: QuestionKind::Emotional,
            applicable_profiles: Vec::new(),
            weight: 2.0,
            mappings: vec![
                TraitMapping {
                    answer_value: "tired".to_string(),
                    target_indications: vec!["Rejuvenescimento".to_string()],
                    target_technologies: Vec::new(),
                    behavioral_tag: "renewal".to_string(),
                    contribution: 3.0,
                },
                TraitMapping {
                    answer_value: "tired".to_string(),
                    target_indications: Vec::new(),
                    target_technologies: vec!["LED".to_string()],
                    behavioral_tag: "gentle".to_string(),
                    contribution: 1.0,
                },
            ],
        };
        QuestionBank::new("test", "p", vec![profiling, skin]).expect("valid bank")
    }

    #[test]
    fn matches_indications_case_insensitively() {
        let candidate = Candidate::new(
            "c1",
            "Lift",
            "Flacidez e REJUVENESCIMENTO facial",
            "radiofrequency",
        );
        let outcome = score(&bank(), &candidate, [("skin", "tired")]);

        assert_eq!(outcome.total, 6.0);
        assert_eq!(outcome.matched.len(), 1);
        assert_eq!(outcome.matched[0].behavioral_tag, "renewal");
    }

    #[test]
    fn each_matching_mapping_contributes_separately() {
        let candidate = Candidate::new("c1", "Glow", "rejuvenescimento", "led panel");
        let outcome = score(&bank(), &candidate, [("skin", "tired")]);

        assert_eq!(outcome.total, 8.0);
        assert_eq!(outcome.matched.len(), 2);
    }

    #[test]
    fn unmatched_answers_and_unknown_questions_score_zero() {
        let candidate = Candidate::new("c1", "Glow", "rejuvenescimento", "led");
        let outcome = score(&bank(), &candidate, [("skin", "fine"), ("missing", "tired")]);

        assert_eq!(outcome.total, 0.0);
        assert!(outcome.matched.is_empty());
    }

    #[test]
    fn empty_targets_never_match() {
        let original = bank();
        let bank = QuestionBank::new(
            "test",
            "p",
            original
                .questions()
                .iter()
                .cloned()
                .map(|mut question| {
                    for mapping in &mut question.mappings {
                        mapping.target_indications = vec!["  ".to_string()];
                        mapping.target_technologies = Vec::new();
                    }
                    question
                })
                .collect(),
        )
        .expect("valid bank");
        let candidate = Candidate::new("c1", "Any", "anything", "whatever");

        assert_eq!(score(&bank, &candidate, [("skin", "tired")]).total, 0.0);
    }

    #[test]
    fn pool_pass_records_a_tag_for_every_candidate_match() {
        let candidates = vec![
            Candidate::new("a", "A", "rejuvenescimento", "laser"),
            Candidate::new("b", "B", "rejuvenescimento", "led"),
            Candidate::new("c", "C", "acne", "ipl"),
        ];
        let pass = score_pool(&bank(), &candidates, &[("skin", "tired")]);

        assert_eq!(pass.scores[&CandidateId("a".to_string())], 6.0);
        assert_eq!(pass.scores[&CandidateId("b".to_string())], 8.0);
        assert_eq!(pass.scores[&CandidateId("c".to_string())], 0.0);
        assert_eq!(
            pass.insights,
            vec![
                "renewal".to_string(),
                "renewal".to_string(),
                "gentle".to_string()
            ]
        );
    }

    #[test]
    fn shared_traits_repeat_once_per_matching_candidate() {
        let candidates = vec![
            Candidate::new("a", "A", "Rejuvenescimento", "hifu"),
            Candidate::new("b", "B", "rejuvenescimento facial", "laser"),
            Candidate::new("c", "C", "REJUVENESCIMENTO", "ipl"),
        ];
        let pass = score_pool(&bank(), &candidates, &[("skin", "tired")]);

        assert_eq!(pass.insights.len(), 3);
        assert!(pass.insights.iter().all(|tag| tag == "renewal"));
    }
}
