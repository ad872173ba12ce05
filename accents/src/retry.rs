use std::future::Future;
use std::time::Duration;

use crate::contents_api::HostError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

#[derive(Debug)]
pub enum RetryError {
    /// Every attempt ended in a version conflict.
    Exhausted { attempts: u32 },
    Failed(HostError),
}

/// Runs `attempt` until it succeeds, retrying only on
/// [`HostError::Conflict`] and sleeping `policy.backoff` in between.
/// The closure receives the 1-based attempt number.
pub async fn retry_on_conflict<T, F, Fut>(policy: RetryPolicy, mut attempt: F) -> Result<T, RetryError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, HostError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    for number in 1..=max_attempts {
        match attempt(number).await {
            Ok(value) => return Ok(value),
            Err(HostError::Conflict) => {
                tracing::warn!(attempt = number, max_attempts, "version conflict");
                if number < max_attempts {
                    tokio::time::sleep(policy.backoff).await;
                }
            }
            Err(error) => return Err(RetryError::Failed(error)),
        }
    }
    Err(RetryError::Exhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            backoff: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn succeeds_after_a_conflict() {
        let calls = AtomicU32::new(0);
        let result = retry_on_conflict(quick(3), |number| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if number == 1 {
                    Err(HostError::Conflict)
                } else {
                    Ok(number)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_the_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<(), RetryError> = retry_on_conflict(quick(3), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(HostError::Conflict) }
        })
        .await;
        assert!(matches!(result, Err(RetryError::Exhausted { attempts: 3 })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), RetryError> = retry_on_conflict(quick(3), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(HostError::Status {
                    status: 500,
                    body: String::new(),
                })
            }
        })
        .await;
        assert!(matches!(result, Err(RetryError::Failed(HostError::Status { status: 500, .. }))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_between_attempts() {
        let started = tokio::time::Instant::now();
        let policy = RetryPolicy {
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        };
        let _: Result<(), RetryError> =
            retry_on_conflict(policy, |_| async { Err(HostError::Conflict) }).await;
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
