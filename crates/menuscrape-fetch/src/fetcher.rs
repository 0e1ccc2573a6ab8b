use std::future::Future;

/// A fetched page, alive only until the payload has been located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub body: String,
    pub status: u16,
    /// URL after redirects.
    pub final_url: String,
}

impl RawDocument {
    #[must_use]
    pub fn new(body: impl Into<String>, status: u16, final_url: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status,
            final_url: final_url.into(),
        }
    }
}

/// Retrieves the raw page for a URL.
///
/// Implementations must bound every call with a finite timeout. Dropping the
/// returned future aborts the request.
pub trait DocumentFetcher: Send + Sync {
    /// # Errors
    ///
    /// Returns `FetchError` on connection failure, timeout, or a non-success status.
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<RawDocument, crate::FetchError>> + Send;
}

impl<T: DocumentFetcher> DocumentFetcher for std::sync::Arc<T> {
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<RawDocument, crate::FetchError>> + Send {
        (**self).fetch(url)
    }
}
