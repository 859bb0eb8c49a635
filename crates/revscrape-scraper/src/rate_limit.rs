//! Retry with exponential backoff for page fetches.
//!
//! Transient failures (429, 5xx, network errors) are retried; everything else
//! is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Whether `err` is worth another attempt after a delay.
///
/// - [`ScraperError::RateLimited`]: the server asked us to back off.
/// - [`ScraperError::Http`]: connection reset, timeout and the like.
/// - [`ScraperError::UnexpectedStatus`] with a 5xx status.
///
/// 404s, other 4xx statuses and malformed URLs would fail the same way again.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        ScraperError::NotFound { .. } | ScraperError::InvalidUrl { .. } => false,
    }
}

/// Run `operation`, retrying transient errors up to `max_retries` more times.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds. When retries run out the last error is returned.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) || attempt >= max_retries => return Err(err),
            Err(err) => err,
        };

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn rate_limited() -> ScraperError {
        ScraperError::RateLimited {
            domain: "www.yelp.test".to_owned(),
            retry_after_secs: 0,
        }
    }

    fn status(status: u16) -> ScraperError {
        ScraperError::UnexpectedStatus {
            status,
            url: "https://www.yelp.test/biz/x".to_owned(),
        }
    }

    /// Run `retry_with_backoff` over a scripted sequence of outcomes and
    /// report the result plus how many attempts were made.
    async fn run_script(
        max_retries: u32,
        script: fn(u32) -> Result<u32, ScraperError>,
    ) -> (Result<u32, ScraperError>, u32) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let result = retry_with_backoff(max_retries, 0, || {
            let counter = Arc::clone(&counter);
            async move { script(counter.fetch_add(1, Ordering::SeqCst)) }
        })
        .await;
        (result, calls.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let (result, calls) = run_script(3, |_| Ok(42)).await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn retries_rate_limits_then_succeeds() {
        let (result, calls) = run_script(3, |n| if n < 2 { Err(rate_limited()) } else { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn retries_server_errors() {
        let (result, calls) = run_script(1, |n| if n == 0 { Err(status(503)) } else { Ok(1) }).await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn returns_last_error_after_exhausting_retries() {
        let (result, calls) = run_script(2, |_| Err(rate_limited())).await;
        assert_eq!(calls, 3);
        assert!(matches!(result, Err(ScraperError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let (result, calls) = run_script(3, |_| Err(status(403))).await;
        assert_eq!(calls, 1);
        assert!(matches!(result, Err(ScraperError::UnexpectedStatus { status: 403, .. })));

        let (result, calls) = run_script(3, |_| {
            Err(ScraperError::NotFound {
                url: "https://www.yelp.test/biz/gone".to_owned(),
            })
        })
        .await;
        assert_eq!(calls, 1);
        assert!(matches!(result, Err(ScraperError::NotFound { .. })));
    }
}
