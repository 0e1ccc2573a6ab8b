/// Domain the scraper understands pages from.
pub const DEFAULT_TARGET_DOMAIN: &str = "zomato.com";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("URL is empty")]
    Empty,

    #[error("URL is not a {domain} page: {url}")]
    ForeignDomain { url: String, domain: String },
}

/// Advisory input check run by callers before scraping.
///
/// Accepts any non-blank URL that contains `domain`, compared case-insensitively.
/// This is input sanitization, not a security boundary.
///
/// # Errors
///
/// Returns `UrlError` when the URL is blank or does not mention the domain.
pub fn validate_target_url(url: &str, domain: &str) -> Result<(), UrlError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }
    if !trimmed
        .to_lowercase()
        .contains(&domain.trim().to_lowercase())
    {
        return Err(UrlError::ForeignDomain {
            url: trimmed.to_owned(),
            domain: domain.to_owned(),
        });
    }
    Ok(())
}
