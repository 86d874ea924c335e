use super::bank::PROFESSIONAL;
use super::domain::{Candidate, ProfileTag};
use std::collections::BTreeMap;

/// Clauses emitted for recognised answers, scanned in this order.
const TRAIT_CLAUSES: &[(&str, &str, &str)] = &[
    (
        "mirror",
        "every small line and detail",
        "an analytical, perfectionist nature",
    ),
    (
        "mirror",
        "the overall glow of my skin",
        "a luminous search for radiance",
    ),
    (
        "mirror",
        "how my clothes fit",
        "a sharp eye for silhouette and proportion",
    ),
    (
        "childhood",
        "building things piece by piece",
        "the patience of someone who builds results step by step",
    ),
    (
        "childhood",
        "summer days at the beach",
        "a sun-kissed soul that never stopped chasing summer",
    ),
    (
        "childhood",
        "dancing and moving all day",
        "a body that remembers the joy of movement",
    ),
    (
        "regret",
        "not taking a bold step",
        "a courage that refuses to stand still",
    ),
    (
        "regret",
        "letting time show on my face",
        "a quiet determination to defy time",
    ),
    (
        "regret",
        "hiding my body in summer",
        "a desire to feel free in your own skin",
    ),
    ("compliment", "you look rested", "a deep craving for serenity"),
    (
        "compliment",
        "your skin is flawless",
        "an uncompromising taste for flawless results",
    ),
    (
        "risk",
        "test it myself first",
        "a pioneer's appetite for innovation",
    ),
    (
        "risk",
        "wait for more evidence",
        "a scientist's respect for evidence",
    ),
    (
        "routine",
        "ten steps every night",
        "the discipline of a true ritualist",
    ),
];

const PROFESSIONAL_CONNECTIVE: &str =
    "Through analysis of your unique professional profile, I identified ";
const PERSONAL_CONNECTIVE: &str = "Decoding your fascinating personality, I discovered ";
const FALLBACK_CLAUSE: &str = "a distinctive balance between your goals and your instincts";

/// Compose the rationale shown alongside the final pick.
pub fn explain(
    top: &Candidate,
    answers: &BTreeMap<String, String>,
    profile: Option<&ProfileTag>,
) -> String {
    let clauses: Vec<&str> = TRAIT_CLAUSES
        .iter()
        .filter(|(question_id, value, _)| {
            answers.get(*question_id).map(String::as_str) == Some(*value)
        })
        .map(|(_, _, clause)| *clause)
        .collect();

    let connective = match profile {
        Some(tag) if tag.as_str() == PROFESSIONAL => PROFESSIONAL_CONNECTIVE,
        _ => PERSONAL_CONNECTIVE,
    };

    let traits = if clauses.is_empty() {
        FALLBACK_CLAUSE.to_string()
    } else {
        join_clauses(&clauses)
    };

    format!(
        "{connective}{traits}. That is why {} is the equipment you were looking for without knowing it.",
        top.name
    )
}

fn join_clauses(clauses: &[&str]) -> String {
    match clauses {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
