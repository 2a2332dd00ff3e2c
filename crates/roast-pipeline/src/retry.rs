//! Retry with exponential backoff.
//!
//! Every error is treated as retryable; the delay before attempt `n + 1` is
//! `base_delay * 2^(n - 1)` with no jitter. The last error propagates when
//! all attempts are exhausted.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Run `op` up to `attempts` times, backing off between failures.
///
/// The closure receives the 1-based attempt number.
pub async fn with_retry<T, E, F, Fut>(
    label: &str,
    attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                let delay = base_delay * 2u32.pow(attempt - 1);
                warn!(
                    label,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Attempt failed, retrying: {}",
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
