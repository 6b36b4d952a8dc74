//! Request deadlines. The browser `fetch` API has no client-wide timeout,
//! so on WASM every request is raced against a timer.

use crate::error::{ApiError, Result};
use futures::future::{self, Either};
use log::warn;
use std::future::Future;
use std::time::Duration;

/// Race `request` against `deadline`. The deadline winning is a `Timeout`
/// for `path`; the request is dropped, which aborts it.
pub async fn with_timeout<T>(
    request: impl Future<Output = Result<T>>,
    deadline: impl Future<Output = ()>,
    path: &str,
    timeout: Duration,
) -> Result<T> {
    futures::pin_mut!(request, deadline);
    match future::select(request, deadline).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => {
            let after_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!("{path} timed out after {after_ms} ms");
            Err(ApiError::Timeout {
                path: path.to_string(),
                after_ms,
            })
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn deadline(timeout: Duration) -> gloo_timers::future::TimeoutFuture {
    gloo_timers::future::TimeoutFuture::new(u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deadline_first_is_timeout() {
        let outcome: Result<u8> = with_timeout(
            future::pending(),
            future::ready(()),
            "/analytics/line-chart",
            Duration::from_millis(10_000),
        )
        .await;
        match outcome {
            Err(ApiError::Timeout { path, after_ms }) => {
                assert_eq!(path, "/analytics/line-chart");
                assert_eq!(after_ms, 10_000);
            }
            other => panic!("expected a timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_answer_first_wins() {
        let outcome = with_timeout(
            future::ready(Ok(7)),
            future::pending(),
            "/auth/verify",
            Duration::from_millis(1),
        )
        .await;
        assert_eq!(outcome.unwrap(), 7);
    }

    #[test]
    fn test_timeout_message() {
        let err = ApiError::Timeout {
            path: "/analytics/bar-chart".to_string(),
            after_ms: 250,
        };
        assert_eq!(err.to_string(), "/analytics/bar-chart timed out after 250 ms");
    }
}
