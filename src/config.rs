use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use homepage_core::DEFAULT_THEME_ID;
use homepage_core::transform::DEFAULT_MAX_SOURCE_BYTES;

/// Name of the optional project config file.
pub const CONFIG_FILE: &str = "homepage.json";

/// Top-level homepage.json schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageConfig {
    #[serde(default = "default_theme")]
    pub default_theme: String,

    #[serde(default = "default_include_source")]
    pub include_source: bool,

    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    #[serde(default = "default_max_source_bytes")]
    pub max_source_bytes: usize,
}

impl Default for HomepageConfig {
    fn default() -> Self {
        Self {
            default_theme: default_theme(),
            include_source: default_include_source(),
            out_dir: default_out_dir(),
            max_source_bytes: default_max_source_bytes(),
        }
    }
}

fn default_theme() -> String {
    DEFAULT_THEME_ID.to_string()
}
fn default_include_source() -> bool {
    true
}
fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}
fn default_max_source_bytes() -> usize {
    DEFAULT_MAX_SOURCE_BYTES
}

/// Load config from a homepage.json file in `dir`, or return defaults if missing.
pub fn load_config(dir: &Path) -> Result<HomepageConfig> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: HomepageConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        log::debug!("loaded {}", config_path.display());
        Ok(config)
    } else {
        Ok(HomepageConfig::default())
    }
}

/// Load the homepage.json that sits beside `source`.
///
/// A relative `outDir` is taken relative to that directory.
pub fn load_config_for(source: &Path) -> Result<HomepageConfig> {
    let dir = source
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut config = load_config(dir)?;
    config.out_dir = dir.join(&config.out_dir);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "defaultTheme": "classic",
            "includeSource": false,
            "outDir": "public",
            "maxSourceBytes": 1024
        }"#;

        let config: HomepageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_theme, "classic");
        assert!(!config.include_source);
        assert_eq!(config.out_dir, PathBuf::from("public"));
        assert_eq!(config.max_source_bytes, 1024);
    }

    #[test]
    fn test_defaults() {
        let config: HomepageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.default_theme, "default");
        assert!(config.include_source);
        assert_eq!(config.out_dir, PathBuf::from("dist"));
        assert_eq!(config.max_source_bytes, 8 * 1024 * 1024);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = std::env::temp_dir().join(format!("homepage-config-missing-{}", std::process::id()));
        let config = load_config(&dir).unwrap();
        assert_eq!(config.default_theme, "default");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = std::env::temp_dir().join(format!("homepage-config-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE), "{ not json").unwrap();
        let err = load_config(&dir).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"), "{err}");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_beside_source_is_used() {
        let dir = std::env::temp_dir().join(format!("homepage-config-beside-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE), r#"{ "defaultTheme": "modern" }"#).unwrap();

        let config = load_config_for(&dir.join("index.md")).unwrap();
        assert_eq!(config.default_theme, "modern");
        assert_eq!(config.out_dir, dir.join("dist"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        let config = load_config_for(Path::new("does-not-exist-here.md")).unwrap();
        assert_eq!(config.out_dir, Path::new(".").join("dist"));
    }
}
