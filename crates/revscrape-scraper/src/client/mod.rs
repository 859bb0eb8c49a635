//! HTTP client for business pages.

mod page_url;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use revscrape_core::ScraperSettings;

use crate::assemble::extract_page;
use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::OutputRecord;

use self::page_url::{domain_of, parse_page_url};

/// Fallback wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Fetches business pages as HTML text.
///
/// 404 and 429 responses come back as typed errors. Transient failures
/// (429, 5xx, network errors) are retried with exponential backoff up to
/// `max_retries` additional attempts.
pub struct PageClient {
    client: Client,
    /// Retry attempts after the first failure.
    max_retries: u32,
    /// Base delay for backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl PageClient {
    /// Build a client with the given timeout, `User-Agent` and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// GET `url` and return the body text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`]: not an absolute http(s) URL (not retried).
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx (5xx retried, 4xx not).
    /// - [`ScraperError::Http`]: network or TLS failure after all retries.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let page_url = parse_page_url(url)?;
        let domain = domain_of(&page_url);
        tracing::info!(url, "fetching page");

        let body = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let page_url = page_url.clone();
            let domain = domain.clone();
            async move {
                let response = self
                    .client
                    .get(page_url.clone())
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(ScraperError::RateLimited {
                        domain,
                        retry_after_secs,
                    });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound {
                        url: page_url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: page_url.to_string(),
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await?;

        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}

/// Fetch one business page and run the extraction pipeline over it.
///
/// # Errors
///
/// Propagates any [`ScraperError`] from [`PageClient::fetch_html`]. Extraction
/// itself never fails; a page with no reviews yields an empty list.
pub async fn scrape_business_page(
    client: &PageClient,
    url: &str,
    settings: &ScraperSettings,
) -> Result<Vec<OutputRecord>, ScraperError> {
    let html = client.fetch_html(url).await?;
    Ok(extract_page(&html, url, settings))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
