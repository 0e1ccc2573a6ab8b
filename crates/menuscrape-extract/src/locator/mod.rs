//! Finds the embedded menu payload in a fetched page.
//!
//! Every registered [`Embedding`] convention is asked for candidates. A
//! candidate survives when it decodes to a JSON object carrying a restaurant
//! name; among survivors the one with the most items wins, with earlier
//! candidates winning ties. Decode failures are counted and skipped.

mod identity;
mod ld_json;
mod next_data;
mod preloaded;

use menuscrape_fetch::RawDocument;
use serde_json::Value;

use crate::error::NotFoundError;
use crate::json::count_items;
use crate::payload::MenuPayload;

pub use identity::find_identity;
pub use ld_json::LdJson;
pub use next_data::NextData;
pub use preloaded::PreloadedState;

/// A parsed page shared by all conventions during one location pass.
pub struct Page<'a> {
    html: &'a str,
    soup: scrape_core::Soup,
}

impl<'a> Page<'a> {
    #[must_use]
    pub fn parse(html: &'a str) -> Self {
        Self {
            html,
            soup: scrape_core::Soup::parse(html),
        }
    }

    #[must_use]
    pub fn html(&self) -> &'a str {
        self.html
    }

    /// Text content of every element matching `selector`, in document order.
    #[must_use]
    pub fn texts(&self, selector: &str) -> Vec<String> {
        match self.soup.find_all(selector) {
            Ok(tags) => tags.into_iter().map(|tag| tag.text()).collect(),
            Err(e) => {
                tracing::warn!("invalid selector {selector}: {e}");
                Vec::new()
            }
        }
    }
}

/// One known way a menu payload is embedded in a page.
pub trait Embedding: Send + Sync {
    fn name(&self) -> &'static str;

    /// Decoded JSON candidates in document order. A candidate that fails to
    /// decode is reported as `Err(reason)` and does not stop the others.
    fn candidates(&self, page: &Page<'_>) -> Vec<Result<Value, String>>;
}

/// Ordered set of embedding conventions.
pub struct EmbeddingRegistry {
    conventions: Vec<Box<dyn Embedding>>,
}

impl Default for EmbeddingRegistry {
    fn default() -> Self {
        Self::new()
            .with(PreloadedState)
            .with(NextData)
            .with(LdJson)
    }
}

impl std::fmt::Debug for EmbeddingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl EmbeddingRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            conventions: Vec::new(),
        }
    }

    /// Append a convention at the lowest priority.
    #[must_use]
    pub fn with(mut self, convention: impl Embedding + 'static) -> Self {
        self.conventions.push(Box::new(convention));
        self
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.conventions.iter().map(|c| c.name()).collect()
    }

    /// # Errors
    ///
    /// Returns `NotFoundError` when no convention yields a valid candidate.
    pub fn locate(&self, doc: &RawDocument) -> Result<MenuPayload, NotFoundError> {
        let page = Page::parse(&doc.body);
        let mut valid = Vec::new();
        let mut rejected = 0;

        for convention in &self.conventions {
            for candidate in convention.candidates(&page) {
                match candidate.and_then(|data| validate(convention.name(), data)) {
                    Ok(payload) => valid.push(payload),
                    Err(reason) => {
                        rejected += 1;
                        tracing::debug!(
                            convention = convention.name(),
                            "rejected payload candidate: {reason}"
                        );
                    }
                }
            }
        }

        let found = valid.len();
        match select_best(valid) {
            Some(payload) => {
                tracing::debug!(
                    convention = payload.convention,
                    restaurant = %payload.identity.name,
                    items = payload.item_count,
                    candidates = found,
                    rejected,
                    "located menu payload"
                );
                Ok(payload)
            }
            None => Err(NotFoundError {
                conventions_tried: self.names(),
                candidates_rejected: rejected,
            }),
        }
    }
}

fn validate(convention: &'static str, data: Value) -> Result<MenuPayload, String> {
    if !data.is_object() {
        return Err("candidate is not a JSON object".to_owned());
    }
    let identity = find_identity(&data).ok_or("no restaurant name in candidate")?;
    Ok(MenuPayload {
        identity,
        convention,
        item_count: count_items(&data),
        data,
    })
}

/// Pick the candidate with the most items; the earliest wins a tie.
#[must_use]
pub fn select_best(candidates: Vec<MenuPayload>) -> Option<MenuPayload> {
    let mut best: Option<MenuPayload> = None;
    for candidate in candidates {
        if best
            .as_ref()
            .is_none_or(|b| candidate.item_count > b.item_count)
        {
            best = Some(candidate);
        }
    }
    best
}

/// Locate a payload with the default conventions.
///
/// # Errors
///
/// Returns `NotFoundError` when the page carries no recognized payload.
pub fn locate(doc: &RawDocument) -> Result<MenuPayload, NotFoundError> {
    EmbeddingRegistry::default().locate(doc)
}
