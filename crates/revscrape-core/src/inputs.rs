use std::path::Path;

use crate::ConfigError;

/// Read business page URLs from `path`, one per line.
///
/// A missing file is not an error: it yields an empty list and a warning.
///
/// # Errors
///
/// Returns [`ConfigError::InputFileIo`] if the file exists but cannot be read.
pub fn load_input_urls(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "input file not found; create it with one business URL per line"
        );
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InputFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let urls = parse_input_urls(&content);
    if urls.is_empty() {
        tracing::warn!(path = %path.display(), "no URLs found in input file");
    }
    Ok(urls)
}

/// Blank lines and lines starting with `#` are skipped.
#[must_use]
pub fn parse_input_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
