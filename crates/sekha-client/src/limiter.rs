//! Sliding-window rate limiter gating outbound requests.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Token-bucket limiter over a sliding window.
///
/// Admits at most `max_requests` acquisitions within any trailing `window`.
/// A budget of zero means fully closed: every acquire waits a full window.
///
/// Callers serialize on an internal mutex for the whole
/// prune-check-sleep-record sequence, so two concurrent acquires can never
/// both observe spare capacity and overshoot the budget. The timestamp is
/// recorded only after any wait completes; a caller cancelled mid-wait
/// leaves no entry behind.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    requests: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter admitting `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: Mutex::new(VecDeque::new()),
        }
    }

    /// Acquire a slot, waiting as long as the budget requires.
    ///
    /// Suspends only the calling task; sibling operations keep running.
    pub async fn acquire(&self) {
        let mut requests = self.requests.lock().await;
        let now = Instant::now();

        // Drop acquisitions that have aged out of the window.
        while let Some(&oldest) = requests.front() {
            if now.duration_since(oldest) >= self.window {
                requests.pop_front();
            } else {
                break;
            }
        }

        if self.max_requests == 0 {
            // Zero budget: closed, not unlimited.
            sleep(self.window).await;
        } else if requests.len() >= self.max_requests as usize {
            if let Some(&oldest) = requests.front() {
                let elapsed = now.duration_since(oldest);
                let wait = self.window.saturating_sub(elapsed);
                if !wait.is_zero() {
                    sleep(wait).await;
                }
            }
        }

        requests.push_back(Instant::now());
    }

    /// Number of acquisitions currently recorded (including aged-out entries
    /// not yet pruned). Test hook.
    #[cfg(test)]
    pub(crate) async fn recorded(&self) -> usize {
        self.requests.lock().await.len()
    }
}
