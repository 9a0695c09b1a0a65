//! Application configuration for lenscheck.
//!
//! Config is looked up as `./lenscheck.toml`, then
//! `~/.lenscheck/lenscheck.toml`. CLI flags override config file values,
//! which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LensCheckError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "lenscheck.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".lenscheck";

// ---------------------------------------------------------------------------
// Config structs (matching lenscheck.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Report rendering.
    #[serde(default)]
    pub output: OutputConfig,

    /// Which files get which checks.
    #[serde(default)]
    pub check: CheckConfig,
}

/// How diagnostics are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// `[check]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Treat warnings as blocking (non-zero exit).
    #[serde(default)]
    pub fail_on_warnings: bool,

    /// Directory names whose Markdown files are articles. Every other
    /// Markdown file is checked for stray directives instead.
    #[serde(default = "default_article_dirs")]
    pub article_dirs: Vec<String>,

    /// File extensions considered content.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            fail_on_warnings: false,
            article_dirs: default_article_dirs(),
            extensions: default_extensions(),
        }
    }
}

fn default_article_dirs() -> Vec<String> {
    vec!["articles".into()]
}
fn default_extensions() -> Vec<String> {
    vec!["md".into()]
}

impl CheckConfig {
    /// Whether `path` lives under one of the configured article directories.
    pub fn is_article(&self, path: &Path) -> bool {
        path.components().any(|c| {
            let part = c.as_os_str().to_string_lossy();
            self.article_dirs.iter().any(|dir| *dir == part)
        })
    }

    /// Whether `path` has one of the configured content extensions.
    pub fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the user config directory (`~/.lenscheck/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LensCheckError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the user config file (`~/.lenscheck/lenscheck.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config. The working directory's `lenscheck.toml`
/// wins over the user's; returns defaults if neither exists.
pub fn load_config() -> Result<AppConfig> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return load_config_from(&local);
    }

    let path = config_file_path()?;
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LensCheckError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        LensCheckError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the user config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| LensCheckError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| LensCheckError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LensCheckError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("article_dirs"));
        assert!(toml_str.contains("format = \"text\""));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert!(!parsed.check.fail_on_warnings);
        assert_eq!(parsed.check.article_dirs, vec!["articles".to_string()]);
        assert_eq!(parsed.output.format, OutputFormat::Text);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[output]
format = "json"

[check]
fail_on_warnings = true
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.check.fail_on_warnings);
        assert_eq!(config.check.extensions, vec!["md".to_string()]);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result: std::result::Result<AppConfig, _> =
            toml::from_str("[output]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn article_and_content_classification() {
        let check = CheckConfig::default();
        assert!(check.is_article(Path::new("content/articles/alignment.md")));
        assert!(!check.is_article(Path::new("content/lessons/intro.md")));
        assert!(check.is_content_file(Path::new("content/lessons/intro.md")));
        assert!(!check.is_content_file(Path::new("content/lessons/intro.json")));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = load_config_from(Path::new("/definitely/not/here/lenscheck.toml"))
            .expect_err("should fail");
        assert!(matches!(err, LensCheckError::Io { .. }));
    }
}
