//! Bounded retry for transient failures.

use std::future::Future;

use sekha_core::error::SekhaResult;

use crate::backoff::ExponentialBackoff;

/// Run `op` up to `max_attempts` times, backing off between attempts.
///
/// Only transient errors (connection failures and timeouts) are retried;
/// validation, auth, not-found, and API status errors are surfaced from the
/// first attempt, since repeating them cannot succeed. The final error is
/// returned unchanged when the budget is exhausted.
pub async fn with_retry<T, F, Fut>(max_attempts: u32, mut op: F) -> SekhaResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SekhaResult<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut backoff = ExponentialBackoff::for_retries();

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && backoff.attempt() + 1 < max_attempts => {
                tracing::warn!(
                    attempt = backoff.attempt() + 1,
                    delay = ?backoff.next_delay(),
                    error = %err,
                    "transient failure, retrying"
                );
                backoff.wait().await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sekha_core::error::SekhaError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_first_try_without_waiting() {
        let calls = AtomicU32::new(0);
        let result = with_retry(3, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, SekhaError>(42)
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_then_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry(3, || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(SekhaError::connection("refused"))
            } else {
                Ok("ok")
            }
        })
        .await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_budget_surfaces_connection_error() {
        let calls = AtomicU32::new(0);
        let result: SekhaResult<()> = with_retry(3, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(SekhaError::connection("refused"))
        })
        .await;
        assert!(matches!(result, Err(SekhaError::Connection { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_error_is_never_retried() {
        let calls = AtomicU32::new(0);
        let result: SekhaResult<()> = with_retry(3, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(SekhaError::from_http_status(404, "missing"))
        })
        .await;
        assert!(matches!(result, Err(SekhaError::NotFound { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_max_attempts_still_runs_once() {
        let calls = AtomicU32::new(0);
        let _: SekhaResult<()> = with_retry(0, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(SekhaError::connection("refused"))
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
