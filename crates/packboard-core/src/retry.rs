//! Bounded-retry utilities for graceful degradation
//!
//! Infrastructure operations (transport writes, cleanup, metrics emission)
//! should fail without crashing the dashboard or the build it instruments.
//! Use these helpers for that class of operation, never for the analyses
//! themselves (those serialize their failures onto the wire instead).

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::Result;

/// Execute an operation that should fail open
///
/// Logs the error via `tracing::warn!` on failure and returns `None`.
pub async fn fail_open<F, Fut, T>(operation_name: &str, f: F) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match f().await {
        Ok(val) => Some(val),
        Err(e) => {
            warn!("{} failed (fail-open): {}", operation_name, e);
            None
        }
    }
}

/// Retry an operation up to `max_attempts` times with a fixed delay
///
/// Returns `None` once every attempt has failed. The producer's shutdown
/// path uses this to wait out in-flight acknowledgments before giving up
/// and closing anyway.
pub async fn retry_with_delay<F, Fut, T>(
    operation_name: &str,
    max_attempts: usize,
    delay: Duration,
    mut f: F,
) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    for attempt in 1..=max_attempts {
        match f().await {
            Ok(val) => return Some(val),
            Err(e) => {
                if attempt == max_attempts {
                    warn!(
                        "{} failed after {} attempts: {}",
                        operation_name, max_attempts, e
                    );
                    return None;
                }
                warn!(
                    "{} failed (attempt {}/{}): {}",
                    operation_name, attempt, max_attempts, e
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PackboardError;

    #[tokio::test]
    async fn test_fail_open_success() {
        let result = fail_open("test_op", || async { Ok::<_, PackboardError>(7) }).await;
        assert_eq!(result, Some(7));
    }

    #[tokio::test]
    async fn test_fail_open_failure() {
        let result = fail_open("test_op", || async {
            Err::<i32, _>(PackboardError::Other("nope".to_string()))
        })
        .await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failure() {
        let mut attempts = 0;
        let result = retry_with_delay(
            "test_op",
            3,
            Duration::from_millis(1),
            || {
                attempts += 1;
                async move {
                    if attempts < 2 {
                        Err(PackboardError::Transport("still busy".to_string()))
                    } else {
                        Ok(attempts)
                    }
                }
            },
        )
        .await;
        assert_eq!(result, Some(2));
    }

    #[tokio::test]
    async fn test_retry_is_bounded() {
        let mut attempts = 0;
        let result = retry_with_delay(
            "test_op",
            3,
            Duration::from_millis(1),
            || {
                attempts += 1;
                async move { Err::<i32, _>(PackboardError::Transport("busy".to_string())) }
            },
        )
        .await;
        assert_eq!(result, None);
        assert_eq!(attempts, 3);
    }
}
