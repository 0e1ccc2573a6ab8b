#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status {
        url: String,
        status: u16,
        /// Seconds from the `Retry-After` header, when the server sent one.
        retry_after: Option<u64>,
    },

    #[error("response too large: {size} bytes (max: {max})")]
    BodyTooLarge { size: usize, max: usize },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_owned(),
            }
        } else {
            Self::Request {
                url: url.to_owned(),
                source,
            }
        }
    }

    /// Whether a retrying fetcher may try the same URL again.
    ///
    /// Timeouts, connection failures, `429` and `5xx` responses are transient.
    /// Everything else (`404`, oversized bodies, client construction) is final.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Request { source, .. } => source.is_connect(),
            Self::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Client(_) | Self::BodyTooLarge { .. } => false,
        }
    }

    /// HTTP status code when the failure came from a non-success response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> FetchError {
        FetchError::Status {
            url: "https://www.zomato.com/x".into(),
            status: code,
            retry_after: None,
        }
    }

    #[test]
    fn not_found_is_final() {
        assert!(!status(404).is_transient());
        assert!(!status(403).is_transient());
    }

    #[test]
    fn rate_limit_and_server_errors_are_transient() {
        assert!(status(429).is_transient());
        assert!(status(500).is_transient());
        assert!(status(503).is_transient());
    }

    #[test]
    fn timeout_is_transient() {
        let err = FetchError::Timeout {
            url: "https://www.zomato.com/x".into(),
        };
        assert!(err.is_transient());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn body_too_large_is_final() {
        let err = FetchError::BodyTooLarge { size: 10, max: 5 };
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "response too large: 10 bytes (max: 5)");
    }

    #[test]
    fn status_display() {
        assert_eq!(
            status(404).to_string(),
            "HTTP 404 from https://www.zomato.com/x"
        );
        assert_eq!(status(404).status(), Some(404));
    }
}
