//! Rate-limit retry policy
//!
//! Wraps a single logical request with bounded retry for rate-limit
//! failures. Every other error kind passes straight through. The async
//! executor waits with `tokio::time::sleep`, so the wait only suspends the
//! current task and is dropped together with the future; the blocking
//! executor parks the calling thread only.

use crate::config::HttpClientConfig;
use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Exponential backoff for rate-limited requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries (0 = fail fast)
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Multiplier applied per retry
    pub backoff_factor: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_secs(1),
            backoff_factor: 2,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the default 1s doubling schedule
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Create a policy from transport configuration
    pub fn from_config(config: &HttpClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: config.initial_backoff,
            backoff_factor: config.backoff_factor,
        }
    }

    /// Same schedule with a different retry budget
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Whether any retry will ever happen
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Computed delay before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        self.backoff_factor
            .checked_pow(retry.saturating_sub(1))
            .and_then(|factor| self.initial_delay.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }

    /// Delay before retry number `retry`, honoring a longer server hint
    pub fn delay_for(&self, retry: u32, hint: Option<Duration>) -> Duration {
        let computed = self.backoff(retry);
        match hint {
            Some(hint) if hint > computed => hint,
            _ => computed,
        }
    }

    /// Run `attempt` until it succeeds, fails with a non-retryable error,
    /// or the retry budget is spent
    pub async fn execute<T, F, Fut>(&self, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut state = RetryState::default();
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) => match state.advance(self, &err) {
                    Some(delay) => tokio::time::sleep(delay).await,
                    None => return Err(err),
                },
            }
        }
    }

    /// Blocking counterpart of [`RetryPolicy::execute`]
    pub fn execute_blocking<T, F>(&self, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        let mut state = RetryState::default();
        loop {
            match attempt() {
                Ok(value) => return Ok(value),
                Err(err) => match state.advance(self, &err) {
                    Some(delay) => std::thread::sleep(delay),
                    None => return Err(err),
                },
            }
        }
    }
}

/// Progress through one retry chain
///
/// Created fresh for every logical request and dropped when it resolves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryState {
    /// Retries performed so far
    pub attempt: u32,
    /// Delay chosen for the most recent retry
    pub next_delay: Option<Duration>,
}

impl RetryState {
    /// Record a failure and decide whether to retry
    ///
    /// Returns the delay to wait before the next attempt, or `None` when
    /// the error must propagate.
    pub fn advance(&mut self, policy: &RetryPolicy, err: &Error) -> Option<Duration> {
        if !err.is_retryable() || self.attempt >= policy.max_retries {
            self.next_delay = None;
            return None;
        }

        self.attempt += 1;
        let delay = policy.delay_for(self.attempt, err.retry_after());
        self.next_delay = Some(delay);

        warn!(
            "Rate limited (429), retry {}/{}, waiting {:?}",
            self.attempt, policy.max_retries, delay
        );
        Some(delay)
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[test]
    fn test_policy_default_is_fail_fast() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 0);
        assert!(!policy.is_enabled());
        assert!(RetryPolicy::new(3).is_enabled());
    }

    #[test]
    fn test_policy_from_config() {
        let config = HttpClientConfig::builder()
            .max_retries(4)
            .backoff(Duration::from_millis(50), 3)
            .build();
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.max_retries, 4);
        assert_eq!(policy.initial_delay, Duration::from_millis(50));
        assert_eq!(policy.backoff_factor, 3);
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::new(5);
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
        assert_eq!(policy.backoff(4), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_saturates() {
        let policy = RetryPolicy::new(u32::MAX);
        assert_eq!(policy.backoff(200), Duration::MAX);
    }

    #[test]
    fn test_backoff_keeps_doubling_until_overflow() {
        let policy = RetryPolicy::new(u32::MAX);
        assert_eq!(policy.backoff(32), Duration::from_secs(1 << 31));
        assert_eq!(policy.backoff(33), Duration::MAX);
        assert_eq!(policy.backoff(34), Duration::MAX);
    }

    #[test]
    fn test_hint_is_a_floor() {
        let policy = RetryPolicy::new(3);
        assert_eq!(
            policy.delay_for(1, Some(Duration::from_secs(10))),
            Duration::from_secs(10)
        );
        // shorter hint than the schedule is ignored
        assert_eq!(
            policy.delay_for(3, Some(Duration::from_secs(1))),
            Duration::from_secs(4)
        );
        assert_eq!(policy.delay_for(2, None), Duration::from_secs(2));
    }

    #[test]
    fn test_retry_state_ignores_other_kinds() {
        let policy = RetryPolicy::new(3);
        let mut state = RetryState::default();
        assert_eq!(state.advance(&policy, &Error::not_found("w/x")), None);
        assert_eq!(state.advance(&policy, &Error::api(500, "")), None);
        assert_eq!(state.attempt, 0);
    }

    #[test]
    fn test_retry_state_exhausts() {
        let policy = RetryPolicy::new(2);
        let mut state = RetryState::default();
        let err = Error::rate_limited(None);
        assert_eq!(state.advance(&policy, &err), Some(Duration::from_secs(1)));
        assert_eq!(state.advance(&policy, &err), Some(Duration::from_secs(2)));
        assert_eq!(state.advance(&policy, &err), None);
        assert_eq!(state.attempt, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_retries_with_backoff() {
        let policy = RetryPolicy::new(3);
        let calls = AtomicU32::new(0);
        let seen = Mutex::new(Vec::new());

        let result = policy
            .execute(|| {
                seen.lock().unwrap().push(Instant::now());
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n <= 3 {
                        Err(Error::rate_limited(None))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 4);
        assert_eq!(calls.load(Ordering::SeqCst), 4);

        let seen = seen.lock().unwrap();
        let waits: Vec<Duration> = seen.windows(2).map(|w| w[1] - w[0]).collect();
        assert_eq!(waits.len(), 3);
        assert!(waits[0] >= Duration::from_secs(1));
        assert!(waits[1] >= Duration::from_secs(2));
        assert!(waits[2] >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_honors_server_hint() {
        let policy = RetryPolicy::new(1);
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result = policy
            .execute(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(Error::rate_limited(Some(Duration::from_secs(30))))
                    } else {
                        Ok(())
                    }
                }
            })
            .await;

        assert!(result.is_ok());
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_no_retry_by_default() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result: Result<()> = policy
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Error::rate_limited(Some(Duration::from_secs(5)))) }
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_exhausted_returns_last_error() {
        let policy = RetryPolicy::new(2);
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .execute(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Err(Error::rate_limited(Some(Duration::from_secs(u64::from(n))))) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            result.unwrap_err().retry_after(),
            Some(Duration::from_secs(3))
        );
    }

    #[tokio::test]
    async fn test_execute_non_retryable_propagates_immediately() {
        let policy = RetryPolicy::new(5);
        for err in [Error::not_found("w/abc"), Error::validation("bad seed")] {
            let kind = err.kind();
            let mut slot = Some(err);
            let calls = AtomicU32::new(0);

            let result: Result<()> = policy
                .execute(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    let err = slot.take().unwrap_or_else(|| Error::api(500, "unexpected"));
                    async move { Err(err) }
                })
                .await;

            assert_eq!(result.unwrap_err().kind(), kind);
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_execute_blocking_retries() {
        let policy = RetryPolicy {
            max_retries: 2,
            initial_delay: Duration::from_millis(1),
            backoff_factor: 2,
        };
        let mut calls = 0;

        let result = policy.execute_blocking(|| {
            calls += 1;
            if calls < 3 {
                Err(Error::rate_limited(None))
            } else {
                Ok("done")
            }
        });

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_execute_blocking_fail_fast() {
        let policy = RetryPolicy::default();
        let mut calls = 0;

        let result: Result<()> = policy.execute_blocking(|| {
            calls += 1;
            Err(Error::rate_limited(None))
        });

        assert!(result.unwrap_err().is_retryable());
        assert_eq!(calls, 1);
    }
}
