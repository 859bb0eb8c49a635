//! Settings file model and loading.
//!
//! The file is YAML (a plain JSON file parses too). Every section and field
//! has a default, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; YelpReviewsScraper/1.0)";
pub const DEFAULT_MAX_REVIEWS: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub http: HttpSettings,
    pub scraper: ScraperSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub user_agent: String,
    #[serde(alias = "timeout")]
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 15,
            max_retries: 3,
            retry_backoff_base_secs: 2,
        }
    }
}

/// Per-page extraction limits and review filter bounds.
///
/// The filter bounds are kept as [`RawSetting`]s: a malformed bound must not
/// fail the whole file, it is dropped (with a warning) when the filters are built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperSettings {
    #[serde(deserialize_with = "lenient_max_reviews")]
    pub max_reviews: usize,
    pub min_rating: Option<RawSetting>,
    pub max_rating: Option<RawSetting>,
    pub from_date: Option<RawSetting>,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            max_reviews: DEFAULT_MAX_REVIEWS,
            min_rating: None,
            max_rating: None,
            from_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub file_name: String,
    pub indent: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            file_name: "reviews.json".to_string(),
            indent: 2,
        }
    }
}

impl OutputSettings {
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// A scalar setting held in textual form.
///
/// Any YAML scalar deserializes: `4`, `4.0`, `"4"` and `"soon"` all succeed
/// here, and it is up to the consumer to decide whether the text is usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawSetting(String);

impl RawSetting {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value as a whole number. A decimal is truncated toward zero, so
    /// `4.5` reads as 4; anything else non-numeric is `None`.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        let text = self.0.trim();
        if let Ok(value) = text.parse::<i64>() {
            return Some(value);
        }
        let (whole, fraction) = text.split_once('.')?;
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        whole.parse::<i64>().ok()
    }
}

impl std::fmt::Display for RawSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RawSetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        Ok(Self(scalar_text(&value)))
    }
}

/// `max_reviews` is read like a filter bound: `"200"` and `150.0` are
/// accepted, and a value that is not a count falls back to the default
/// instead of failing the whole file.
fn lenient_max_reviews<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawSetting::deserialize(deserializer)?;
    if raw.as_str().trim().is_empty() {
        return Ok(DEFAULT_MAX_REVIEWS);
    }
    match raw.as_integer().and_then(|n| usize::try_from(n).ok()) {
        Some(max_reviews) => Ok(max_reviews),
        None => {
            tracing::warn!(
                setting = "scraper.max_reviews",
                value = %raw,
                default = DEFAULT_MAX_REVIEWS,
                "ignoring invalid max_reviews"
            );
            Ok(DEFAULT_MAX_REVIEWS)
        }
    }
}

fn scalar_text(value: &serde_yaml::Value) -> String {
    use serde_yaml::Value;

    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i.to_string();
            }
            // `4.0` is an integer bound written as a float.
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
                _ => n.to_string(),
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

/// Load and validate settings from a YAML (or JSON) file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let settings = parse_settings(&content).map_err(|source| ConfigError::SettingsFileParse {
        path: path.display().to_string(),
        source,
    })?;

    validate_settings(&settings)?;
    Ok(settings)
}

fn parse_settings(content: &str) -> Result<Settings, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content)
}

fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if settings.http.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "http.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if settings.output.file_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output.file_name must be non-empty".to_string(),
        ));
    }
    Ok(())
}

/// Resolve settings the forgiving way: `primary` if it exists, else its
/// `.example` sibling, else built-in defaults.
///
/// A file that exists but cannot be loaded is logged and skipped; this never fails.
#[must_use]
pub fn resolve_settings(primary: &Path) -> Settings {
    let fallback = example_path(primary);

    for candidate in [Some(primary.to_path_buf()), fallback].into_iter().flatten() {
        if !candidate.exists() {
            continue;
        }
        match load_settings(&candidate) {
            Ok(settings) => {
                tracing::info!(path = %candidate.display(), "loaded settings");
                return settings;
            }
            Err(e) => {
                tracing::error!(path = %candidate.display(), error = %e, "failed to load settings file");
            }
        }
    }

    tracing::warn!("using built-in default settings");
    Settings::default()
}

/// `config/settings.yaml` → `config/settings.example.yaml`.
fn example_path(primary: &Path) -> Option<PathBuf> {
    let stem = primary.file_stem()?.to_str()?;
    let name = match primary.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.example.{ext}"),
        None => format!("{stem}.example"),
    };
    Some(primary.with_file_name(name))
}
