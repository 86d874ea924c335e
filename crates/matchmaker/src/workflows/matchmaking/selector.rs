use super::bank::QuestionBank;
use super::domain::{ProfileTag, Question, QuestionKind};

/// Above this many active candidates, emotional questions jump the weight ordering.
pub const LARGE_POOL_THRESHOLD: usize = 5;

/// Pick the next question to ask, or `None` when nothing eligible remains.
///
/// Without a profile only the profiling question can be offered. Afterwards the
/// unasked questions for the profile are ordered by weight (descending), with
/// emotional questions first while the pool is large. Ties keep bank order.
pub fn next_question<'a>(
    bank: &'a QuestionBank,
    profile: Option<&ProfileTag>,
    asked: &[String],
    active_pool: usize,
) -> Option<&'a Question> {
    let Some(profile) = profile else {
        return bank
            .profiling_question()
            .filter(|question| !asked.contains(&question.id));
    };

    let mut eligible: Vec<&Question> = bank
        .questions_for_profile(profile)
        .filter(|question| !asked.contains(&question.id))
        .collect();

    let emotional_first = active_pool > LARGE_POOL_THRESHOLD;
    eligible.sort_by(|a, b| {
        let rank = |question: &Question| emotional_first && question.kind == QuestionKind::Emotional;
        rank(b)
            .cmp(&rank(a))
            .then_with(|| b.weight.total_cmp(&a.weight))
    });

    eligible.into_iter().next()
}
