use super::domain::{Candidate, CandidateId};
use std::collections::BTreeMap;

/// Smallest pool the filter will shrink to in a single pass.
pub const MIN_KEPT: usize = 3;
/// Share of positively scored candidates kept when that share exceeds [`MIN_KEPT`].
pub const KEEP_RATIO: f64 = 0.6;

/// Shrink the active pool using the latest scores.
///
/// Only positively scored candidates survive, best first, and at least
/// `max(3, ceil(0.6 * n))` of them are kept. When nothing scored, the first three
/// entries of the current pool carry over so the pool never empties.
pub fn prune(active: &[Candidate], scores: &BTreeMap<CandidateId, f64>) -> Vec<Candidate> {
    let score_of = |candidate: &Candidate| scores.get(&candidate.id).copied().unwrap_or(0.0);

    let mut positive: Vec<&Candidate> = active
        .iter()
        .filter(|candidate| score_of(candidate) > 0.0)
        .collect();

    if positive.is_empty() {
        tracing::warn!(
            active = active.len(),
            "no candidate matched the latest answers; keeping leading candidates"
        );
        return active.iter().take(MIN_KEPT).cloned().collect();
    }

    // stable: equal scores keep their current pool order
    positive.sort_by(|a, b| score_of(b).total_cmp(&score_of(a)));

    let keep = MIN_KEPT.max((KEEP_RATIO * positive.len() as f64).ceil() as usize);
    let kept: Vec<Candidate> = positive.into_iter().take(keep).cloned().collect();

    tracing::debug!(before = active.len(), after = kept.len(), "pruned candidate pool");
    kept
}
