use std::time::Duration;

/// Cosmetic pause between "answer submitted" and "scores recomputed".
///
/// Purely presentational; a zero delay skips the sleep entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThinkingPause {
    delay: Duration,
}

impl ThinkingPause {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub const fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
