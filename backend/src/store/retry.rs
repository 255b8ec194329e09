use crate::error::{AppError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(50);

/// Runs `op` up to three times, backing off exponentially between
/// attempts. Only conflict and transient-store failures are retried; every
/// other error surfaces immediately. A deadline that would expire during
/// the back-off aborts instead of sleeping. Read paths call their
/// operation directly and never go through here.
pub async fn with_retries<T, F, Fut>(deadline: Option<Instant>, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut backoff = INITIAL_BACKOFF;
    let mut attempt = 1;

    loop {
        match op().await {
            Err(err) if err.is_retryable() && attempt < MAX_ATTEMPTS => {
                if let Some(deadline) = deadline {
                    if Instant::now() + backoff >= deadline {
                        return Err(AppError::DeadlineExceeded);
                    }
                }
                tracing::warn!(attempt, error = %err, "retrying after transient failure");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
                attempt += 1;
            }
            other => return other,
        }
    }
}
