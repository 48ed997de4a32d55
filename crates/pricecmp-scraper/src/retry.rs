//! Optional retry with exponential backoff for page and search fetches.
//!
//! Fetches are single-attempt unless `max_retries` is raised in config.
//! Only transient failures are retried; anything that would fail the same way
//! again is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Returns `true` if `err` represents a transient condition that may succeed
/// on another attempt.
///
/// Retriable:
/// - [`FetchError::Timeout`] and [`FetchError::Network`].
/// - [`FetchError::HttpStatus`] for 429 and any 5xx.
///
/// Not retriable: other statuses, [`FetchError::Blocked`] (bot challenges
/// don't clear on an immediate retry), [`FetchError::InvalidUrl`] and
/// [`FetchError::Client`].
fn is_retriable(err: &FetchError) -> bool {
    match err {
        FetchError::Timeout { .. } | FetchError::Network { .. } => true,
        FetchError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        FetchError::Blocked { .. } | FetchError::InvalidUrl { .. } | FetchError::Client(_) => {
            false
        }
    }
}

/// Executes `operation`, retrying transient errors up to `max_retries`
/// additional times. The wait before retry `n` (1-based) is
/// `backoff_base_ms * 2^(n-1)` milliseconds.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_ms = backoff_base_ms.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms,
            error = %err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        attempt += 1;
    }
}
