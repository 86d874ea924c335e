use std::sync::Arc;

use matchmaker::workflows::catalog::{demo_catalog, StaticCatalog};
use matchmaker::workflows::matchmaking::{
    confidence, MatchmakingEngine, Phase, QuestionBank, SeededPhrases, MAX_QUESTIONS,
};
use proptest::prelude::*;

fn engine_for(pool_size: usize) -> MatchmakingEngine<StaticCatalog, SeededPhrases> {
    let pool = demo_catalog().into_iter().take(pool_size).collect();
    MatchmakingEngine::new(
        Arc::new(QuestionBank::standard()),
        StaticCatalog::new(pool),
        SeededPhrases::from_seed(pool_size as u64),
    )
    .expect("pool is not empty")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_answer_path_terminates_within_the_question_cap(
        pool_size in 1usize..=10,
        picks in prop::collection::vec(0usize..8, 16),
    ) {
        let mut engine = engine_for(pool_size);
        let mut previous_pool = engine.remaining_candidates().len();
        let mut steps = 0;

        while let Some(question) = engine.current_question() {
            let value = question.options[picks[steps % picks.len()] % question.options.len()].clone();
            let id = question.id.clone();
            engine.answer(&id, &value).expect("bank option accepted");
            steps += 1;

            let pool = engine.remaining_candidates().len();
            prop_assert!(pool >= 1);
            prop_assert!(pool <= previous_pool);
            prop_assert!((0.0..=100.0).contains(&engine.confidence()));
            previous_pool = pool;
        }

        let asked = engine.session().asked_question_ids();
        prop_assert!(asked.len() <= MAX_QUESTIONS);
        let mut unique = asked.to_vec();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), asked.len());
        prop_assert_eq!(engine.phase(), Phase::Attempting);
        prop_assert!(engine.attempt_reveal().is_ok());
    }

    #[test]
    fn confidence_stays_within_percent_bounds(
        total in 0usize..50,
        remaining in 0usize..50,
        asked in 0usize..30,
    ) {
        let value = confidence(total, remaining, asked);
        prop_assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn reset_always_returns_to_the_same_fresh_session(
        pool_size in 1usize..=10,
        answered in 0usize..6,
    ) {
        let mut engine = engine_for(pool_size);
        let fresh = engine.session().clone();

        for _ in 0..answered {
            let Some(question) = engine.current_question() else { break };
            let (id, value) = (question.id.clone(), question.options[0].clone());
            engine.answer(&id, &value).expect("first option accepted");
        }

        engine.reset().expect("reset");
        prop_assert_eq!(engine.session(), &fresh);
        engine.reset().expect("second reset");
        prop_assert_eq!(engine.session(), &fresh);
    }
}
