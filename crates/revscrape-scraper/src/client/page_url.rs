//! Business page URL checks.

use reqwest::Url;

use crate::error::ScraperError;

/// Parse `raw` as an absolute `http`/`https` URL with a host.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] for anything else.
pub(super) fn parse_page_url(raw: &str) -> Result<Url, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidUrl {
        url: raw.to_owned(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
    }
    if !url.host_str().is_some_and(|host| !host.is_empty()) {
        return Err(invalid("missing host".to_owned()));
    }
    Ok(url)
}

/// Hostname for error messages, or the whole URL when it has none.
pub(super) fn domain_of(url: &Url) -> String {
    url.host_str()
        .map_or_else(|| url.as_str().to_owned(), str::to_owned)
}
