//! Page retrieval for menuscrape: the fetcher seam plus retry and cache decorators.

#![forbid(unsafe_code)]

pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod retry;
pub mod target;

pub use cache::CachingFetcher;
pub use config::FetchConfig;
pub use error::FetchError;
pub use fetcher::{DocumentFetcher, RawDocument};
pub use http::HttpFetcher;
pub use retry::RetryingFetcher;
pub use target::{DEFAULT_TARGET_DOMAIN, UrlError, validate_target_url};
