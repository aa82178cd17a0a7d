//! Retry with exponential backoff for vocabulary retrieval.
//!
//! Retries only on transport errors (connection failures, timeouts). Error
//! statuses and undecodable bodies are returned immediately.

use std::time::Duration;

/// Base delay between retries (doubles each attempt: 200ms, 400ms, ...).
const BASE_DELAY_MS: u64 = 200;

/// Send an HTTP request, retrying transport failures up to `max_retries`
/// times.
///
/// The closure `f` is called up to `max_retries + 1` times. The caller is
/// responsible for inspecting the response status code.
pub(crate) async fn retry_send<F, Fut>(
    max_retries: u32,
    f: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    for attempt in 0..max_retries {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt));
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries,
                    "vocabulary request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    f().await
}
