use std::future::Future;
use std::time::Duration;

use tracing::{error, warn};

use crate::config::retry_config::RetryConfig;
use crate::ports::spreadsheet_gateway::SpreadsheetGatewayError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub initial_delay: Duration,
    pub backoff_factor: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        RetryPolicy {
            attempts: config.attempts,
            initial_delay: Duration::from_secs(config.initial_delay_secs),
            backoff_factor: config.backoff_factor,
        }
    }
}

impl RetryPolicy {
    /// At least one attempt is always made.
    pub fn attempts(&self) -> u32 {
        self.attempts.max(1)
    }

    /// Sleeps taken between consecutive attempts, so one fewer than [`RetryPolicy::attempts`].
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use program_copier::application::retry::RetryPolicy;
    /// let delays: Vec<_> = RetryPolicy::default().delays().collect();
    /// assert_eq!(delays, vec![Duration::from_secs(2), Duration::from_secs(4)]);
    /// ```
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let factor = self.backoff_factor;
        std::iter::successors(Some(self.initial_delay), move |delay| {
            Some(delay.saturating_mul(factor))
        })
        .take(self.attempts().saturating_sub(1) as usize)
    }
}

/// Runs `call` until it succeeds, backing off after each transport failure.
///
/// Exhausting the attempts is not an error: it yields `Ok(None)` and the caller decides what
/// "did not happen" means. Any other failure is returned untouched on the first occurrence.
pub async fn retry_operation<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut call: F,
) -> error_stack::Result<Option<T>, SpreadsheetGatewayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = error_stack::Result<T, SpreadsheetGatewayError>>,
{
    let attempts = policy.attempts();
    let mut delays = policy.delays();

    for attempt in 1..=attempts {
        let report = match call().await {
            Ok(value) => return Ok(Some(value)),
            Err(report) => report,
        };

        match report.current_context() {
            SpreadsheetGatewayError::Transport { status, reason } => {
                warn!(
                    operation,
                    status = ?status,
                    "Retry {}/{}: {}",
                    attempt,
                    attempts,
                    reason
                );
            }
            _ => return Err(report),
        }

        if let Some(delay) = delays.next() {
            tokio::time::sleep(delay).await;
        }
    }

    error!(operation, "Operation failed after {} attempts", attempts);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use error_stack::report;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    fn unavailable() -> error_stack::Report<SpreadsheetGatewayError> {
        report!(SpreadsheetGatewayError::transport(
            Some(503),
            "503 Service Unavailable"
        ))
    }

    #[test]
    fn test_delays_follow_backoff() {
        let policy = RetryPolicy {
            attempts: 4,
            initial_delay: Duration::from_secs(1),
            backoff_factor: 3,
        };
        let delays: Vec<_> = policy.delays().collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(3),
                Duration::from_secs(9)
            ]
        );
    }

    #[test]
    fn test_delays_saturate_instead_of_stopping() {
        let policy = RetryPolicy {
            attempts: 4,
            initial_delay: Duration::MAX / 2,
            backoff_factor: 4,
        };
        let delays: Vec<_> = policy.delays().collect();
        assert_eq!(delays, vec![Duration::MAX / 2, Duration::MAX, Duration::MAX]);
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            attempts: 0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.attempts(), 1);
        assert_eq!(policy.delays().count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt() {
        let start = Instant::now();
        let call_times = Mutex::new(Vec::new());

        let result = retry_operation(&RetryPolicy::default(), "flaky", || async {
            let mut times = call_times.lock().unwrap();
            times.push(start.elapsed());
            if times.len() < 3 {
                Err(unavailable())
            } else {
                Ok("copied")
            }
        })
        .await
        .unwrap();

        assert_eq!(result, Some("copied"));
        assert_eq!(
            *call_times.lock().unwrap(),
            vec![
                Duration::ZERO,
                Duration::from_secs(2),
                Duration::from_secs(6)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_without_raising() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result: Option<()> = retry_operation(&RetryPolicy::default(), "broken", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(unavailable())
        })
        .await
        .unwrap();

        assert_eq!(result, None);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // No sleep after the last attempt.
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_transport_errors_are_not_retried() {
        let calls = AtomicU32::new(0);

        let result: error_stack::Result<Option<()>, _> =
            retry_operation(&RetryPolicy::default(), "lookup", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(report!(SpreadsheetGatewayError::NotFound("999".to_string())))
            })
            .await;

        let report = result.unwrap_err();
        assert_eq!(
            report.current_context(),
            &SpreadsheetGatewayError::NotFound("999".to_string())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
