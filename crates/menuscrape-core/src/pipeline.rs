//! Fetch → locate → parse → flatten → assemble.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use menuscrape_extract::{EmbeddingRegistry, NotFoundError, SchemaError, SchemaRegistry};
use menuscrape_fetch::{DocumentFetcher, FetchError, HttpFetcher, RetryingFetcher};

use crate::assemble::assemble;
use crate::config::Config;
use crate::flatten::flatten;
use crate::record::MenuRecord;
use crate::sink::{MenuSink, SinkError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Locating,
    Parsing,
    Flattening,
    Assembling,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetching => "fetching",
            Self::Locating => "locating",
            Self::Parsing => "parsing",
            Self::Flattening => "flattening",
            Self::Assembling => "assembling",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("save failed: {0}")]
    Save(#[from] SinkError),
}

impl ScrapeError {
    /// The stage that failed.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Transport(_) => Stage::Fetching,
            Self::NotFound(_) => Stage::Locating,
            Self::Schema(_) => Stage::Parsing,
            Self::Save(_) => Stage::Assembling,
        }
    }
}

/// Result of one successful scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuOutcome {
    pub restaurant: String,
    pub records: Vec<MenuRecord>,
    /// Items dropped for having no name.
    pub excluded: usize,
    /// Embedding convention the payload was found through.
    pub convention: &'static str,
    /// Schema variant that decoded the payload.
    pub schema: &'static str,
    pub saved_to: Option<PathBuf>,
}

impl MenuOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Runs the scrape pipeline over a pluggable fetcher.
///
/// Holds no per-call state, so one scraper can serve concurrent calls.
pub struct MenuScraper<F> {
    fetcher: F,
    embeddings: EmbeddingRegistry,
    schemas: SchemaRegistry,
    sink: Option<Box<dyn MenuSink>>,
}

impl<F: fmt::Debug> fmt::Debug for MenuScraper<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuScraper")
            .field("fetcher", &self.fetcher)
            .field("embeddings", &self.embeddings)
            .field("schemas", &self.schemas)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

/// Scraper built from [`Config`]: HTTP with retries, saving in the configured
/// format.
pub type DefaultScraper = MenuScraper<RetryingFetcher<HttpFetcher>>;

impl<F: DocumentFetcher> MenuScraper<F> {
    /// A scraper with the built-in embedding conventions and schema variants
    /// and no sink.
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            embeddings: EmbeddingRegistry::default(),
            schemas: SchemaRegistry::default(),
            sink: None,
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: impl MenuSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn with_boxed_sink(mut self, sink: Box<dyn MenuSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use]
    pub fn with_embeddings(mut self, embeddings: EmbeddingRegistry) -> Self {
        self.embeddings = embeddings;
        self
    }

    #[must_use]
    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Scrape the menu at `url`, optionally persisting it through the sink.
    ///
    /// A page whose menu has no items yields an empty outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] tagged with the failing stage. No partial
    /// records are returned on failure.
    pub async fn get_menu(&self, url: &str, save: bool) -> Result<MenuOutcome, ScrapeError> {
        tracing::debug!(url, stage = %Stage::Fetching, "scrape started");
        let doc = self.fetcher.fetch(url).await?;
        tracing::info!(url, stage = %Stage::Fetching, status = doc.status, bytes = doc.body.len(), "page fetched");

        let payload = self.embeddings.locate(&doc)?;
        tracing::info!(
            url,
            stage = %Stage::Locating,
            convention = payload.convention,
            restaurant = %payload.identity.name,
            items = payload.item_count,
            "menu payload located"
        );

        let tree = self.schemas.parse(&payload)?;
        tracing::info!(
            url,
            stage = %Stage::Parsing,
            schema = tree.schema,
            categories = tree.categories.len(),
            items = tree.item_count(),
            "menu parsed"
        );

        let flat = flatten(&tree);
        tracing::info!(
            url,
            stage = %Stage::Flattening,
            records = flat.records.len(),
            excluded = flat.excluded,
            "menu flattened"
        );

        let assembled = assemble(flat.records, save, self.sink.as_deref())?;
        if assembled.records.is_empty() {
            tracing::info!(url, stage = %Stage::Assembling, "menu has no items");
        }

        Ok(MenuOutcome {
            restaurant: tree.identity.name,
            records: assembled.records,
            excluded: flat.excluded,
            convention: payload.convention,
            schema: tree.schema,
            saved_to: assembled.saved_to,
        })
    }
}

impl DefaultScraper {
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let http = HttpFetcher::new(&config.fetch)?;
        let fetcher = RetryingFetcher::new(
            http,
            config.fetch.max_retries,
            Duration::from_millis(config.fetch.retry_base_delay_ms),
        )
        .with_max_delay(Duration::from_secs(config.fetch.max_retry_delay));
        Ok(Self::new(fetcher).with_boxed_sink(config.output.sink()))
    }
}

/// Scrape `url` with the default configuration.
///
/// # Errors
///
/// See [`MenuScraper::get_menu`].
pub async fn get_menu(url: &str, save: bool) -> Result<MenuOutcome, ScrapeError> {
    MenuScraper::from_config(&Config::default())?
        .get_menu(url, save)
        .await
}
