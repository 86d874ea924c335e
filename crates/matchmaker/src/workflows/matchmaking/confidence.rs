/// Heuristic confidence percentage in `[0, 100]`.
///
/// Rules are checked in order and the first match wins.
pub fn confidence(total_eligible: usize, remaining: usize, questions_asked: usize) -> f64 {
    let value = if remaining <= 1 && questions_asked >= 6 {
        95.0
    } else if remaining <= 2 && questions_asked >= 8 {
        85.0
    } else if remaining <= 3 && questions_asked >= 6 {
        75.0
    } else if remaining <= 4 && questions_asked >= 5 {
        65.0
    } else if questions_asked < 5 {
        (questions_asked as f64 * 8.0).max(10.0)
    } else {
        let eliminated = if total_eligible == 0 {
            0.0
        } else {
            total_eligible.saturating_sub(remaining) as f64 / total_eligible as f64
        };
        (eliminated * 50.0 + questions_asked as f64 * 4.0)
            .round()
            .max(15.0)
    };

    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::confidence;

    #[test]
    fn settled_pools_hit_fixed_levels() {
        assert_eq!(confidence(10, 1, 6), 95.0);
        assert_eq!(confidence(10, 2, 8), 85.0);
        assert_eq!(confidence(10, 3, 6), 75.0);
        assert_eq!(confidence(10, 4, 5), 65.0);
    }

    #[test]
    fn rule_order_decides_overlaps() {
        // remaining 2 with 7 questions skips the 85 rule and lands on 75
        assert_eq!(confidence(10, 2, 7), 75.0);
        assert_eq!(confidence(10, 1, 5), 65.0);
    }

    #[test]
    fn early_questions_grow_linearly_with_floor() {
        assert_eq!(confidence(10, 10, 0), 10.0);
        assert_eq!(confidence(10, 10, 1), 10.0);
        assert_eq!(confidence(10, 10, 2), 16.0);
        assert_eq!(confidence(10, 10, 4), 32.0);
    }

    #[test]
    fn later_questions_blend_elimination_and_progress() {
        // (10 - 6) / 10 * 50 + 5 * 4 = 40
        assert_eq!(confidence(10, 6, 5), 40.0);
        // 0 eliminated, 5 asked -> 20
        assert_eq!(confidence(10, 10, 5), 20.0);
        // (7 - 5) / 7 * 50 + 6 * 4 = 38.28 -> 38
        assert_eq!(confidence(7, 5, 6), 38.0);
    }

    #[test]
    fn stays_within_bounds() {
        assert_eq!(confidence(20, 5, 30), 100.0);
        assert_eq!(confidence(0, 5, 6), 24.0);
    }
}
