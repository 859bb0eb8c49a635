use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.settings_path, PathBuf::from("./config/settings.yaml"));
    assert_eq!(cfg.input_path, PathBuf::from("./data/inputs.txt"));
    assert!(cfg.output_path.is_none());
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("REVSCRAPE_SETTINGS_PATH", "/etc/revscrape/settings.yaml");
    map.insert("REVSCRAPE_INPUT_PATH", "urls.txt");
    map.insert("REVSCRAPE_OUTPUT_PATH", "out/reviews.json");
    map.insert("REVSCRAPE_LOG_LEVEL", "DEBUG");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.settings_path,
        PathBuf::from("/etc/revscrape/settings.yaml")
    );
    assert_eq!(cfg.input_path, PathBuf::from("urls.txt"));
    assert_eq!(cfg.output_path, Some(PathBuf::from("out/reviews.json")));
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn build_app_config_treats_blank_output_path_as_unset() {
    let mut map = HashMap::new();
    map.insert("REVSCRAPE_OUTPUT_PATH", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.output_path.is_none());
}

#[test]
fn build_app_config_fails_with_empty_settings_path() {
    let mut map = HashMap::new();
    map.insert("REVSCRAPE_SETTINGS_PATH", "");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVSCRAPE_SETTINGS_PATH"),
        "expected InvalidEnvVar(REVSCRAPE_SETTINGS_PATH), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_unknown_log_level() {
    let mut map = HashMap::new();
    map.insert("REVSCRAPE_LOG_LEVEL", "chatty");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVSCRAPE_LOG_LEVEL"),
        "expected InvalidEnvVar(REVSCRAPE_LOG_LEVEL), got: {result:?}"
    );
}

#[test]
fn parse_log_level_accepts_filter_directives() {
    assert_eq!(
        parse_log_level("revscrape_scraper=debug,info").unwrap(),
        "revscrape_scraper=debug,info"
    );
}
