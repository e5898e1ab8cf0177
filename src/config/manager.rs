use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::paths;
use crate::translation::{AUTO_DETECT, validate_source_language, validate_target_language};

/// Endpoint used for both services when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// The `[translate]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateSection {
    /// Base URL of the translation service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Default source language code (`auto` to detect).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Default target language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// The `[chat]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSection {
    /// Base URL of the chat service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// The complete configuration file, `~/.config/desk/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub translate: TranslateSection,
    #[serde(default)]
    pub chat: ChatSection,
}

/// Command-line overrides for a translation run.
#[derive(Debug, Clone, Default)]
pub struct TranslateOverrides {
    pub endpoint: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Translation settings after merging CLI flags, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTranslateConfig {
    pub endpoint: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Resolves translation settings. CLI flags win over the config file,
/// which wins over built-in defaults.
///
/// # Errors
///
/// Returns an error if no target language is configured, a language code
/// is not supported, or the endpoint is not an http(s) URL.
pub fn resolve_translate_config(
    overrides: &TranslateOverrides,
    config_file: &ConfigFile,
) -> Result<ResolvedTranslateConfig> {
    let section = &config_file.translate;

    let endpoint = overrides
        .endpoint
        .as_ref()
        .or(section.endpoint.as_ref())
        .map_or(DEFAULT_ENDPOINT, String::as_str)
        .to_string();
    validate_endpoint(&endpoint)?;

    let source_lang = overrides
        .from
        .as_ref()
        .or(section.from.as_ref())
        .map_or(AUTO_DETECT, String::as_str)
        .to_string();
    validate_source_language(&source_lang)?;

    let target_lang = overrides
        .to
        .as_ref()
        .or(section.to.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'to' (target language)\n\n\
                 Please provide it via:\n  \
                 - CLI option: desk --to <lang>\n  \
                 - Config file: run 'desk configure'"
            )
        })?;
    validate_target_language(&target_lang)?;

    Ok(ResolvedTranslateConfig {
        endpoint,
        source_lang,
        target_lang,
    })
}

/// Resolves the chat service endpoint: CLI flag, then config file, then default.
pub fn resolve_chat_endpoint(
    endpoint_override: Option<&str>,
    config_file: &ConfigFile,
) -> Result<String> {
    let endpoint = endpoint_override
        .or(config_file.chat.endpoint.as_deref())
        .unwrap_or(DEFAULT_ENDPOINT)
        .to_string();
    validate_endpoint(&endpoint)?;
    Ok(endpoint)
}

/// Checks that an endpoint looks like an http(s) base URL.
pub fn validate_endpoint(endpoint: &str) -> Result<()> {
    let rest = endpoint
        .strip_prefix("http://")
        .or_else(|| endpoint.strip_prefix("https://"));

    match rest {
        Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
        _ => bail!(
            "Invalid endpoint: '{endpoint}'\n\n\
             Endpoints must be http:// or https:// URLs, e.g. {DEFAULT_ENDPOINT}"
        ),
    }
}

/// Manages loading and saving the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for `$XDG_CONFIG_HOME/desk/config.toml`
    /// (or `~/.config/desk/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a manager for an explicit config file path.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the config file, treating a missing file as an empty config.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        match fs::metadata(&self.config_path) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ConfigFile::default()),
            _ => self.load(),
        }
    }

    /// Saves the config through a temp file and rename, so an interrupted
    /// write never leaves a truncated config behind.
    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let parent = self
            .config_path
            .parent()
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        let temp_path = parent.join(".config.toml.tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.config_path).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config() -> ConfigFile {
        ConfigFile {
            translate: TranslateSection {
                endpoint: Some("http://translate.local:5000".to_string()),
                from: Some("en".to_string()),
                to: Some("fr".to_string()),
            },
            chat: ChatSection {
                endpoint: Some("http://chat.local:5000".to_string()),
            },
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("desk/config.toml"));

        manager.save(&sample_config()).unwrap();

        assert_eq!(manager.load().unwrap(), sample_config());
        assert!(!temp_dir.path().join("desk/.config.toml.tmp").exists());
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));

        assert!(manager.load().is_err());
        assert_eq!(manager.load_or_default().unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_load_or_default_reports_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[translate\nto = ").unwrap();

        let err = ConfigManager::with_path(&path).load_or_default().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_partial_file_parses() {
        let config: ConfigFile = toml::from_str("[chat]\nendpoint = \"http://x:1\"\n").unwrap();
        assert_eq!(config.chat.endpoint.as_deref(), Some("http://x:1"));
        assert_eq!(config.translate, TranslateSection::default());
    }

    #[test]
    fn test_resolve_translate_defaults() {
        let overrides = TranslateOverrides {
            to: Some("fr".to_string()),
            ..TranslateOverrides::default()
        };

        let resolved = resolve_translate_config(&overrides, &ConfigFile::default()).unwrap();

        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(resolved.source_lang, AUTO_DETECT);
        assert_eq!(resolved.target_lang, "fr");
    }

    #[test]
    fn test_resolve_translate_missing_target() {
        let err = resolve_translate_config(&TranslateOverrides::default(), &ConfigFile::default())
            .unwrap_err();
        assert!(err.to_string().contains("'to'"));
    }

    #[test]
    fn test_resolve_translate_rejects_bad_values() {
        let mut config = sample_config();
        config.translate.to = Some("klingon".to_string());
        assert!(resolve_translate_config(&TranslateOverrides::default(), &config).is_err());

        let overrides = TranslateOverrides {
            endpoint: Some("127.0.0.1:5000".to_string()),
            ..TranslateOverrides::default()
        };
        let err = resolve_translate_config(&overrides, &sample_config()).unwrap_err();
        assert!(err.to_string().contains("Invalid endpoint"));
    }

    #[test]
    fn test_resolve_chat_endpoint() {
        assert_eq!(
            resolve_chat_endpoint(None, &ConfigFile::default()).unwrap(),
            DEFAULT_ENDPOINT
        );
        assert_eq!(
            resolve_chat_endpoint(None, &sample_config()).unwrap(),
            "http://chat.local:5000"
        );
        assert_eq!(
            resolve_chat_endpoint(Some("https://faq.example.com"), &sample_config()).unwrap(),
            "https://faq.example.com"
        );
    }

    #[test]
    fn test_validate_endpoint() {
        assert!(validate_endpoint("http://127.0.0.1:5000").is_ok());
        assert!(validate_endpoint("https://example.com/").is_ok());
        assert!(validate_endpoint("http://").is_err());
        assert!(validate_endpoint("ftp://example.com").is_err());
    }
}
