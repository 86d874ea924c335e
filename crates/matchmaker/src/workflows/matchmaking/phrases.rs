use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Flavor text shown while the engine "thinks" between answers.
pub const THINKING_PHRASES: &[&str] = &[
    "Reading between the lines",
    "Cross-checking your instincts",
    "Weighing every hesitation",
    "Connecting memories to results",
    "Listening to what you did not say",
    "Tuning the shortlist",
    "Following a promising hunch",
    "Comparing you with thousands of stories",
];

/// Source of cosmetic phrases; kept behind a trait so callers can inject determinism.
pub trait PhraseProvider {
    fn thinking_phrase(&mut self) -> &'static str;
}

/// Picks phrases uniformly from [`THINKING_PHRASES`] using an owned RNG.
pub struct SeededPhrases {
    rng: StdRng,
}

impl SeededPhrases {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is configured, entropy-backed otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl PhraseProvider for SeededPhrases {
    fn thinking_phrase(&mut self) -> &'static str {
        THINKING_PHRASES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("Thinking")
    }
}
