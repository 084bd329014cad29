//! CLI Configuration
//!
//! Settings are resolved per field: command-line flag (or its environment
//! variable) first, then the profile's config file, then the built-in default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::client::{IpamClient, DEFAULT_BASE_URL};
use crate::error::{Error, Result};
use crate::output::OutputFormat;

/// Keys accepted by `config set` / `config get`
pub const KEYS: [&str; 3] = ["base_url", "idempotency_key", "format"];

/// Contents of `~/.ipamctl/config[.<profile>].toml`
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub base_url: Option<String>,
    pub idempotency_key: Option<String>,
    pub format: Option<OutputFormat>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    /// Load a config file; a missing file yields the empty config
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save to the profile's config file, returning its path
    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| Error::Config("Cannot find home directory".into()))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".ipamctl").join(filename))
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        let value = Some(value).filter(|v| !v.is_empty());
        match key {
            "base_url" => self.base_url = value,
            "idempotency_key" => self.idempotency_key = value,
            "format" => {
                self.format = value
                    .map(|v| v.parse::<OutputFormat>().map_err(Error::Config))
                    .transpose()?
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Value of `key` for display; the idempotency key is masked
    pub fn display_value(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "base_url" => self.base_url.clone(),
            "idempotency_key" => self.idempotency_key.as_deref().map(mask),
            "format" => self.format.map(|f| f.to_string()),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }
}

fn unknown_key(key: &str) -> Error {
    Error::Config(format!(
        "Unknown config key: {} (expected one of {})",
        key,
        KEYS.join(", ")
    ))
}

fn mask(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "****".to_string();
    }
    let visible: String = secret.chars().take(8).collect();
    format!("{}****", visible)
}

/// Fully resolved settings handed to every command
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub idempotency_key: Option<String>,
    pub format: OutputFormat,
}

impl Settings {
    /// Merge flag/environment values over the config file and defaults.
    /// Empty strings count as unset at every layer.
    pub fn resolve(
        base_url: Option<String>,
        idempotency_key: Option<String>,
        format: Option<OutputFormat>,
        file: &Config,
    ) -> Self {
        Self {
            base_url: non_empty(base_url)
                .or_else(|| non_empty(file.base_url.clone()))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            idempotency_key: non_empty(idempotency_key)
                .or_else(|| non_empty(file.idempotency_key.clone())),
            format: format.or(file.format).unwrap_or_default(),
        }
    }

    pub fn client(&self) -> Result<IpamClient> {
        IpamClient::new(&self.base_url, self.idempotency_key.as_deref())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(None, None, None, &Config::default());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.idempotency_key, None);
        assert_eq!(settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_flag_wins_over_file() {
        let file = Config {
            base_url: Some("http://file:8000".into()),
            idempotency_key: Some("file-key".into()),
            format: Some(OutputFormat::Yaml),
        };
        let settings = Settings::resolve(
            Some("http://flag:8000".into()),
            Some("flag-key".into()),
            Some(OutputFormat::Json),
            &file,
        );
        assert_eq!(settings.base_url, "http://flag:8000");
        assert_eq!(settings.idempotency_key.as_deref(), Some("flag-key"));
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_values_fall_through() {
        let file = Config {
            base_url: Some("http://file:8000".into()),
            idempotency_key: Some(String::new()),
            format: None,
        };
        let settings = Settings::resolve(Some(String::new()), Some(String::new()), None, &file);
        assert_eq!(settings.base_url, "http://file:8000");
        assert_eq!(settings.idempotency_key, None);
    }

    #[test]
    fn test_set_and_display() {
        let mut config = Config::default();
        config.set("idempotency_key", "abcdefghijkl".into()).unwrap();
        config.set("format", "json".into()).unwrap();
        assert_eq!(
            config.display_value("idempotency_key").unwrap().as_deref(),
            Some("abcdefgh****")
        );
        assert_eq!(config.display_value("format").unwrap().as_deref(), Some("json"));

        config.set("idempotency_key", "retry-1".into()).unwrap();
        assert_eq!(
            config.display_value("idempotency_key").unwrap().as_deref(),
            Some("****")
        );
        assert!(config.set("api_key", "x".into()).is_err());
        assert!(config.set("format", "xml".into()).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            base_url: Some("http://ipam.internal".into()),
            idempotency_key: None,
            format: Some(OutputFormat::Yaml),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
