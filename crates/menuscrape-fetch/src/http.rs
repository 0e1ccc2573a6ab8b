//! reqwest-backed fetcher with the timeouts and body cap from [`FetchConfig`].

use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::fetcher::{DocumentFetcher, RawDocument};

/// Build the HTTP client used for page fetches.
///
/// # Errors
///
/// Returns `FetchError::Client` if the TLS backend cannot be initialized.
pub fn build_client(config: &FetchConfig) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(FetchError::Client)
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the HTTP client cannot be built.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(config)?,
            max_body_bytes: config.max_body_bytes,
        })
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, max_body_bytes: usize) -> Self {
        Self {
            client,
            max_body_bytes,
        }
    }

    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}

fn retry_after_secs(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        let resp = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
                retry_after: retry_after_secs(&resp),
            });
        }

        if let Some(len) = resp.content_length()
            && usize::try_from(len).unwrap_or(usize::MAX) > self.max_body_bytes
        {
            return Err(FetchError::BodyTooLarge {
                size: usize::try_from(len).unwrap_or(usize::MAX),
                max: self.max_body_bytes,
            });
        }

        let final_url = resp.url().to_string();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        if bytes.len() > self.max_body_bytes {
            return Err(FetchError::BodyTooLarge {
                size: bytes.len(),
                max: self.max_body_bytes,
            });
        }

        tracing::debug!(
            url,
            final_url = %final_url,
            bytes = bytes.len(),
            "fetched document"
        );

        Ok(RawDocument {
            body: String::from_utf8_lossy(&bytes).into_owned(),
            status: status.as_u16(),
            final_url,
        })
    }
}
