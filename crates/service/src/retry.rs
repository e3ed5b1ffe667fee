//! Bounded-backoff retry for the transactional write boundary.
//!
//! Only transport-level failures are retried; domain errors and SQL
//! errors surface immediately. Because the comment/attachment create is
//! a single transaction, a retried attempt never observes partial state
//! from a failed one.

use std::future::Future;
use std::time::Duration;

/// Delays between attempts (milliseconds). Three attempts total.
const RETRY_DELAYS_MS: [u64; 2] = [100, 250];

/// Whether a sqlx error is worth retrying.
///
/// Transport-level problems (connection drop, pool exhaustion) may clear
/// up; everything else is deterministic and retrying would just repeat
/// the failure.
fn is_retryable(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut)
}

/// Run a storage operation, retrying transient failures with bounded
/// backoff.
pub(crate) async fn with_retry<T, F, Fut>(op: &'static str, mut call: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut delays = RETRY_DELAYS_MS.iter();

    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if is_retryable(&err) => match delays.next() {
                Some(&delay_ms) => {
                    tracing::warn!(
                        op,
                        error = %err,
                        delay_ms,
                        "Transient storage failure, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                None => {
                    tracing::error!(op, error = %err, "Storage retries exhausted");
                    return Err(err);
                }
            },
            Err(err) => return Err(err),
        }
    }
}
