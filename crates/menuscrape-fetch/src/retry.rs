use std::time::Duration;

use crate::error::FetchError;
use crate::fetcher::{DocumentFetcher, RawDocument};

/// Decorator that retries transient failures of the wrapped fetcher.
///
/// Waits `Retry-After` seconds when the server sent them, otherwise
/// `base_delay * 2^attempt`. Every wait is capped at `max_delay`. Final
/// failures (see [`FetchError::is_transient`]) are returned on the first attempt.
#[derive(Debug, Clone)]
pub struct RetryingFetcher<F> {
    inner: F,
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
}

pub const DEFAULT_MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

impl<F> RetryingFetcher<F> {
    #[must_use]
    pub fn new(inner: F, max_retries: u32, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: DEFAULT_MAX_RETRY_DELAY,
        }
    }

    /// Cap for a single wait, including server-sent `Retry-After`.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    #[must_use]
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

pub(crate) fn retry_delay(
    err: &FetchError,
    base: Duration,
    max: Duration,
    attempt: u32,
) -> Duration {
    let delay = if let FetchError::Status {
        retry_after: Some(secs),
        ..
    } = err
    {
        Duration::from_secs(*secs)
    } else {
        base.saturating_mul(1u32 << attempt.min(16))
    };
    delay.min(max)
}

impl<F: DocumentFetcher> DocumentFetcher for RetryingFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch(url).await {
                Ok(doc) => return Ok(doc),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = retry_delay(&e, self.base_delay, self.max_delay, attempt);
                    tracing::warn!(
                        url,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "fetch failed, retrying: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
