// In crates/api-client/src/retry.rs

use std::future::Future;
use std::time::Duration;

use app_config::HttpSettings;
use tokio::time::timeout;

use crate::{Error, Result};

/// Bounded timeout plus a small number of retries for transient transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Upper bound for a single attempt.
    pub timeout: Duration,
    /// Attempts made after the first one fails transiently.
    pub max_retries: u32,
    /// Pause before each retry.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&HttpSettings::default())
    }
}

impl From<&HttpSettings> for RetryPolicy {
    fn from(settings: &HttpSettings) -> Self {
        Self {
            timeout: Duration::from_secs(settings.timeout_secs),
            max_retries: settings.max_retries,
            backoff: Duration::from_millis(settings.retry_backoff_ms),
        }
    }
}

/// Runs `operation` under `policy`.
///
/// Every attempt is bounded by `policy.timeout`. A failure is retried only when
/// [`Error::is_transient`] says so; anything else is returned immediately.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, operation_name: &str, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        let result = match timeout(policy.timeout, operation()).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                operation: operation_name.to_string(),
                elapsed: policy.timeout,
            }),
        };

        match result {
            Err(e) if e.is_transient() && attempt < policy.max_retries => {
                attempt += 1;
                tracing::warn!(
                    operation = operation_name,
                    attempt,
                    max_retries = policy.max_retries,
                    error = %e,
                    "Transient failure. Retrying..."
                );
                tokio::time::sleep(policy.backoff).await;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_secs(1),
            max_retries,
            backoff: Duration::from_millis(1),
        }
    }

    fn server_error() -> Error {
        Error::HttpStatus { status: 503, body: "unavailable".into() }
    }

    #[tokio::test]
    async fn test_retries_transient_failure_once() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = with_retry(&policy(1), "test", move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(server_error())
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = with_retry(&policy(1), "test", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(server_error())
        })
        .await;

        assert!(matches!(result, Err(Error::HttpStatus { status: 503, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_content_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = with_retry(&policy(3), "test", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(Error::ApiError { code: "apiKeyInvalid".into(), msg: "bad key".into() })
        })
        .await;

        assert!(matches!(result, Err(Error::ApiError { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_attempt_times_out() {
        let result: Result<()> = with_retry(&policy(0), "slow", || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(Error::Timeout { ref operation, .. }) if operation == "slow"));
    }

    #[test]
    fn test_policy_from_settings() {
        let policy = RetryPolicy::from(&HttpSettings {
            timeout_secs: 10,
            max_retries: 2,
            retry_backoff_ms: 250,
        });
        assert_eq!(policy.timeout, Duration::from_secs(10));
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.backoff, Duration::from_millis(250));
    }
}
