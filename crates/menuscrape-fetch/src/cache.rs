use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::error::FetchError;
use crate::fetcher::{DocumentFetcher, RawDocument};

#[derive(Debug)]
struct CacheEntry {
    document: RawDocument,
    stored_at: Instant,
}

/// URL-keyed document cache wrapped around another fetcher.
///
/// Only successful fetches are stored. The lock is never held across an
/// `.await`, so concurrent scrapes of different URLs do not serialize on it.
#[derive(Debug)]
pub struct CachingFetcher<F> {
    inner: F,
    ttl: Option<Duration>,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl<F> CachingFetcher<F> {
    /// `ttl = None` keeps entries until they are invalidated.
    #[must_use]
    pub fn new(inner: F, ttl: Option<Duration>) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Drop the cached document for `url`. Returns whether one was present.
    pub fn invalidate(&self, url: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url)
            .is_some()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, url: &str) -> Option<RawDocument> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(url)?;
        if self.ttl.is_some_and(|ttl| entry.stored_at.elapsed() > ttl) {
            entries.remove(url);
            return None;
        }
        Some(entry.document.clone())
    }

    fn store(&self, url: &str, document: &RawDocument) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                url.to_owned(),
                CacheEntry {
                    document: document.clone(),
                    stored_at: Instant::now(),
                },
            );
    }
}

impl<F: DocumentFetcher> DocumentFetcher for CachingFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        if let Some(doc) = self.lookup(url) {
            tracing::debug!(url, "document cache hit");
            return Ok(doc);
        }
        let doc = self.inner.fetch(url).await?;
        self.store(url, &doc);
        Ok(doc)
    }
}
