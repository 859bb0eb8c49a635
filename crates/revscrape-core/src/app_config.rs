use std::path::PathBuf;

/// Process-level configuration resolved from the environment.
///
/// Scraping behaviour lives in the settings file (see [`crate::Settings`]);
/// this only says where to find that file, the input list, and how loud to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub settings_path: PathBuf,
    pub input_path: PathBuf,
    /// Overrides `output.directory` / `output.file_name` from the settings file.
    pub output_path: Option<PathBuf>,
    pub log_level: String,
}
