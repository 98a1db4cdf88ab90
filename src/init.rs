use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use homepage_core::ThemeRegistry;

use crate::config::CONFIG_FILE;

/// Scaffold a new source file from a theme's starter content.
///
/// Also writes a `homepage.json` next to it recording the theme, unless one
/// already exists.
pub fn new_document(
    registry: &ThemeRegistry,
    path: &Path,
    theme_id: &str,
    force: bool,
    quiet: bool,
) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        );
    }

    let theme = registry
        .resolve(theme_id)
        .with_context(|| format!("Cannot scaffold '{}'", path.display()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }

    fs::write(path, theme.default_content())
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    if !quiet {
        println!("  {} {}", "Created".green(), path.display());
    }

    let config_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config_path = config_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        fs::write(&config_path, generate_config_json(theme.id()))
            .with_context(|| format!("Failed to write '{}'", config_path.display()))?;
        if !quiet {
            println!("  {} {}", "Created".green(), config_path.display());
        }
    }

    if !quiet {
        println!();
        println!("{}", "Done! Next steps:".bold());
        println!("  1. Edit {} with your own content", path.display());
        println!("  2. Run `homepage build {}` to produce homepage.zip", path.display());
    }

    Ok(())
}

fn generate_config_json(theme_id: &str) -> String {
    let config = serde_json::json!({
        "defaultTheme": theme_id,
        "includeSource": true,
        "outDir": "dist",
    });
    format!("{}\n", serde_json::to_string_pretty(&config).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir()
            .join("homepage-init-test")
            .join(format!("{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_theme_content_and_config() {
        let dir = temp_dir("writes");
        let file = dir.join("index.md");
        let registry = ThemeRegistry::builtin();

        new_document(&registry, &file, "classic", false, true).unwrap();

        let content = fs::read_to_string(&file).unwrap();
        assert!(content.starts_with("# Marius Hoffmann"));
        let config = fs::read_to_string(dir.join(CONFIG_FILE)).unwrap();
        assert!(config.contains("\"defaultTheme\": \"classic\""), "{config}");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = temp_dir("overwrite");
        let file = dir.join("index.md");
        let registry = ThemeRegistry::builtin();
        fs::create_dir_all(&dir).unwrap();
        fs::write(&file, "mine").unwrap();

        assert!(new_document(&registry, &file, "classic", false, true).is_err());
        assert_eq!(fs::read_to_string(&file).unwrap(), "mine");

        new_document(&registry, &file, "modern", true, true).unwrap();
        assert!(fs::read_to_string(&file).unwrap().starts_with("# Alex Rivera"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let dir = temp_dir("unknown");
        let registry = ThemeRegistry::builtin();
        let err = new_document(&registry, &dir.join("a.md"), "nope", false, true).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown theme 'nope'"), "{err:#}");
    }
}
