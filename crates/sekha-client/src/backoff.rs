//! Exponential backoff with jitter for spacing out retries.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;

/// Stateful exponential backoff.
///
/// The delay for attempt `n` is `min(base_delay * factor^n, max_delay)`,
/// plus up to 10% jitter so concurrent retrying clients do not synchronize.
/// Each instance carries its own entropy-seeded PRNG; jitter never depends
/// on ambient task identity.
#[derive(Debug)]
pub struct ExponentialBackoff {
    base_delay: Duration,
    max_delay: Duration,
    factor: f64,
    attempt: u32,
    rng: StdRng,
}

impl ExponentialBackoff {
    /// Create a backoff starting at `base_delay`, growing by `factor` per
    /// attempt, capped at `max_delay`.
    pub fn new(base_delay: Duration, max_delay: Duration, factor: f64) -> Self {
        Self {
            base_delay,
            max_delay,
            factor,
            attempt: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Backoff used between client retry attempts: 0.5s doubling up to 10s.
    pub fn for_retries() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_secs(10), 2.0)
    }

    /// Current attempt count.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Delay for the current attempt, pre-jitter. Pure query; does not
    /// advance state.
    pub fn next_delay(&self) -> Duration {
        let exp = self.base_delay.as_secs_f64() * self.factor.powi(self.attempt as i32);
        let capped = exp.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Advance the attempt counter.
    pub fn record_attempt(&mut self) {
        self.attempt = self.attempt.saturating_add(1);
    }

    /// Sleep for the current delay plus jitter, then advance the attempt
    /// counter. A caller cancelled during the sleep does not advance it.
    pub async fn wait(&mut self) {
        let delay = self.next_delay();
        let jitter = delay.mul_f64(0.1 * self.rng.gen::<f64>());
        sleep(delay + jitter).await;
        self.record_attempt();
    }

    /// Reset the attempt counter to zero.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn backoff() -> ExponentialBackoff {
        ExponentialBackoff::new(Duration::from_millis(100), Duration::from_secs(5), 2.0)
    }

    #[test]
    fn test_delay_grows_geometrically() {
        let mut b = backoff();
        assert_eq!(b.next_delay(), Duration::from_millis(100));
        b.record_attempt();
        assert_eq!(b.next_delay(), Duration::from_millis(200));
        b.record_attempt();
        assert_eq!(b.next_delay(), Duration::from_millis(400));
    }

    #[test]
    fn test_delay_is_monotone_and_capped() {
        let mut b = backoff();
        let mut prev = Duration::ZERO;
        for _ in 0..32 {
            let delay = b.next_delay();
            assert!(delay >= prev);
            assert!(delay <= Duration::from_secs(5));
            prev = delay;
            b.record_attempt();
        }
        assert_eq!(b.next_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_next_delay_does_not_advance() {
        let b = backoff();
        assert_eq!(b.next_delay(), b.next_delay());
        assert_eq!(b.attempt(), 0);
    }

    #[test]
    fn test_reset_returns_to_base() {
        let mut b = backoff();
        b.record_attempt();
        b.record_attempt();
        b.reset();
        assert_eq!(b.attempt(), 0);
        assert_eq!(b.next_delay(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_stays_within_jitter_bound() {
        let mut b = backoff();
        for _ in 0..5 {
            let delay = b.next_delay();
            let start = Instant::now();
            b.wait().await;
            let elapsed = start.elapsed();
            assert!(elapsed >= delay);
            assert!(elapsed <= delay.mul_f64(1.1));
        }
        assert_eq!(b.attempt(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_wait_does_not_advance_attempt() {
        let backoff = std::sync::Arc::new(tokio::sync::Mutex::new(backoff()));

        let task = tokio::spawn({
            let backoff = backoff.clone();
            async move { backoff.lock().await.wait().await }
        });
        // Let the task enter its sleep (delay is 100ms), then cancel it.
        tokio::time::advance(Duration::from_millis(50)).await;
        tokio::task::yield_now().await;
        task.abort();
        let _ = task.await;

        let backoff = backoff.lock().await;
        assert_eq!(backoff.attempt(), 0);
        assert_eq!(backoff.next_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_huge_attempt_count_saturates() {
        let mut b = backoff();
        for _ in 0..1000 {
            b.record_attempt();
        }
        assert_eq!(b.next_delay(), Duration::from_secs(5));
    }
}
