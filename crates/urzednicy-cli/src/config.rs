//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use urzednicy_sdk::WikibaseConfig;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File this configuration is saved to
    #[serde(skip)]
    location: Option<PathBuf>,
}

/// Wikibase endpoint profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// URL of `api.php`
    pub api_url: String,

    /// Language for searching existing items
    #[serde(default = "default_language")]
    pub search_language: String,

    /// Custom User-Agent header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Profile {
    /// Create a profile for an endpoint
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            search_language: default_language(),
            user_agent: None,
            timeout_secs: None,
        }
    }

    /// Client configuration for this profile
    pub fn wikibase_config(&self) -> WikibaseConfig {
        let mut config = WikibaseConfig::new(&self.api_url);
        config.search_language = self.search_language.clone();
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_secs = timeout;
        }
        config
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".urzednicy").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.location = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.location {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "default".to_string(),
            Profile::new("https://prunus-208.man.poznan.pl/api.php"),
        );

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            location: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_language() -> String {
    "pl".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.profiles.contains_key("default"));
        assert!(config.settings.color);
        assert_eq!(config.get_active_profile().unwrap().search_language, "pl");
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let mut profile = Profile::new("https://wikibase.example.org/w/api.php");
        profile.search_language = "en".to_string();

        config.set_profile("test".to_string(), profile);
        assert!(config.profiles.contains_key("test"));

        config.switch_profile("test".to_string()).unwrap();
        assert_eq!(config.active_profile, "test");
        assert_eq!(config.get_active_profile().unwrap().wikibase_config().search_language, "en");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_overrides_client_settings() {
        let mut profile = Profile::new("https://wikibase.example.org/w/api.php");
        profile.user_agent = Some("UrzednicyBot/1.0 (ops@example.org)".to_string());
        profile.timeout_secs = Some(90);

        let client = profile.wikibase_config();
        assert_eq!(client.user_agent, "UrzednicyBot/1.0 (ops@example.org)");
        assert_eq!(client.timeout_secs, 90);
        assert_eq!(client.api_url, "https://wikibase.example.org/w/api.php");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set_profile("local".to_string(), Profile::new("http://localhost:8181/w/api.php"));
        config.switch_profile("local".to_string()).unwrap();
        config.save().unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.active_profile, "local");
        assert_eq!(loaded.profiles["local"].api_url, "http://localhost:8181/w/api.php");
        assert_eq!(loaded.profiles["local"].search_language, "pl");
    }
}
