//! Command handlers: scrape a list of URLs, or parse one saved page.

use std::path::{Path, PathBuf};

use anyhow::Context;
use revscrape_core::{load_input_urls, resolve_settings, AppConfig, Settings};
use revscrape_scraper::{extract_page, scrape_business_page, OutputRecord, PageClient};

use crate::export::export_to_json;

/// Command-line path overrides for `run`; `None` falls back to [`AppConfig`].
#[derive(Debug, Default)]
pub(crate) struct RunPaths {
    pub settings: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Scrape every input URL in order and write all records to one JSON file.
///
/// A URL that fails is logged and skipped. Nothing is written when no URL
/// produced a record.
///
/// # Errors
///
/// Returns an error if the input list cannot be read, the HTTP client cannot
/// be built, or the output file cannot be written.
pub(crate) async fn run_scrape(config: &AppConfig, paths: RunPaths) -> anyhow::Result<()> {
    let settings_path = paths.settings.unwrap_or_else(|| config.settings_path.clone());
    let input_path = paths.input.unwrap_or_else(|| config.input_path.clone());

    let settings = resolve_settings(&settings_path);
    let urls = load_input_urls(&input_path)?;
    if urls.is_empty() {
        tracing::error!(path = %input_path.display(), "no input URLs found, nothing to do");
        return Ok(());
    }

    let http = &settings.http;
    let client = PageClient::new(
        http.timeout_secs,
        &http.user_agent,
        http.max_retries,
        http.retry_backoff_base_secs,
    )
    .context("failed to build HTTP client")?;

    let records = scrape_all(&client, &urls, &settings).await;
    if records.is_empty() {
        tracing::error!("no data extracted from any URL, not writing output");
        return Ok(());
    }

    let output_path = output_path(paths.output, config, &settings);
    export_to_json(&records, &output_path, settings.output.indent)?;
    tracing::info!(path = %output_path.display(), "scraping completed");
    Ok(())
}

async fn scrape_all(client: &PageClient, urls: &[String], settings: &Settings) -> Vec<OutputRecord> {
    let mut all = Vec::new();
    let total = urls.len();

    for (idx, url) in urls.iter().enumerate() {
        tracing::info!(n = idx + 1, total, url = %url, "processing URL");
        match scrape_business_page(client, url, &settings.scraper).await {
            Ok(records) if records.is_empty() => {
                tracing::warn!(url = %url, "no reviews extracted");
            }
            Ok(records) => {
                tracing::info!(url = %url, count = records.len(), "extracted review records");
                all.extend(records);
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "failed to scrape URL, skipping");
            }
        }
    }

    all
}

/// Precedence: `--output`, then `REVSCRAPE_OUTPUT_PATH`, then the settings file.
fn output_path(flag: Option<PathBuf>, config: &AppConfig, settings: &Settings) -> PathBuf {
    flag.or_else(|| config.output_path.clone())
        .unwrap_or_else(|| settings.output.path())
}

/// Run extraction over a saved HTML file and print the records as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the records cannot be
/// serialized.
pub(crate) fn run_parse(
    config: &AppConfig,
    html_file: &Path,
    url: &str,
    settings_override: Option<PathBuf>,
) -> anyhow::Result<()> {
    let settings_path = settings_override.unwrap_or_else(|| config.settings_path.clone());
    let settings = resolve_settings(&settings_path);

    let html = std::fs::read_to_string(html_file)
        .with_context(|| format!("failed to read {}", html_file.display()))?;
    let records = extract_page(&html, url, &settings.scraper);

    let json = serde_json::to_string_pretty(&records).context("failed to serialize records")?;
    println!("{json}");
    Ok(())
}
