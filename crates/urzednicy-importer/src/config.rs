//! Configuration for the importer
//!
//! Every property and item id used while mapping records lives here, with the
//! production instance's values as defaults. A vocabulary TOML only needs the
//! keys it overrides.

use crate::error::ImporterError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use urzednicy_domain::EntityId;

/// Property ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Properties {
    /// instance of
    pub instance_of: EntityId,
    /// given name
    pub given_name: EntityId,
    /// family name
    pub family_name: EntityId,
    /// called (string): the place a person was "of"
    pub called: EntityId,
    /// coat of arms
    pub coat_of_arms: EntityId,
    /// date of birth
    pub date_of_birth: EntityId,
    /// date of death
    pub date_of_death: EntityId,
    /// floruit
    pub floruit: EntityId,
    /// place of birth
    pub place_of_birth: EntityId,
    /// PRNG gazetteer identifier
    pub prng: EntityId,
    /// stated as
    pub stated_as: EntityId,
    /// position held
    pub position_held: EntityId,
    /// start time (qualifier)
    pub start_time: EntityId,
    /// end time (qualifier)
    pub end_time: EntityId,
    /// point in time (qualifier)
    pub point_in_time: EntityId,
    /// earliest date (qualifier for "po")
    pub after: EntityId,
    /// latest date (qualifier for "przed")
    pub before: EntityId,
    /// circa (qualifier for "ok.")
    pub circa: EntityId,
    /// stated in (reference)
    pub stated_in: EntityId,
    /// volume (reference)
    pub volume: EntityId,
    /// notebook (reference)
    pub notebook: EntityId,
    /// reference URL
    pub reference_url: EntityId,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            instance_of: EntityId::property(47),
            given_name: EntityId::property(184),
            family_name: EntityId::property(183),
            called: EntityId::property(373),
            coat_of_arms: EntityId::property(27),
            date_of_birth: EntityId::property(7),
            date_of_death: EntityId::property(8),
            floruit: EntityId::property(54),
            place_of_birth: EntityId::property(55),
            prng: EntityId::property(274),
            stated_as: EntityId::property(195),
            position_held: EntityId::property(9),
            start_time: EntityId::property(203),
            end_time: EntityId::property(204),
            point_in_time: EntityId::property(252),
            after: EntityId::property(38),
            before: EntityId::property(39),
            circa: EntityId::property(189),
            stated_in: EntityId::property(192),
            volume: EntityId::property(232),
            notebook: EntityId::property(343),
            reference_url: EntityId::property(182),
        }
    }
}

/// Class items used as `instance of` values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classes {
    /// human
    pub human: EntityId,
    /// male given name
    pub given_name: EntityId,
    /// family name
    pub family_name: EntityId,
    /// coat of arms
    pub coat_of_arms: EntityId,
    /// position
    pub position: EntityId,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            human: EntityId::item(32),
            given_name: EntityId::item(987),
            family_name: EntityId::item(34),
            coat_of_arms: EntityId::item(53),
            position: EntityId::item(65),
        }
    }
}

/// The printed register cited on every position and name form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceReference {
    /// Item of the book
    pub book: EntityId,
    /// Volume number
    pub volume: String,
    /// Notebook number
    pub notebook: String,
    /// Online edition
    pub url: String,
}

impl Default for SourceReference {
    fn default() -> Self {
        Self {
            book: EntityId::item(919),
            volume: "2".to_string(),
            notebook: "2".to_string(),
            url: "http://serwerone.nazwa.pl/urzednicy10/".to_string(),
        }
    }
}

/// Configuration for the importer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    /// Property ids
    pub properties: Properties,

    /// Class item ids
    pub classes: Classes,

    /// Source cited in references
    pub source: SourceReference,

    /// Languages that receive the label and description; the first one is
    /// the primary (search) language
    pub languages: Vec<String>,

    /// Coats of arms containing this text are skipped
    pub unknown_coat_of_arms: String,

    /// Maximum number of records to process
    pub limit: Option<usize>,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            properties: Properties::default(),
            classes: Classes::default(),
            source: SourceReference::default(),
            languages: vec!["pl".to_string(), "en".to_string()],
            unknown_coat_of_arms: "nieznany".to_string(),
            limit: None,
        }
    }
}

impl ImporterConfig {
    /// The primary language
    pub fn primary_language(&self) -> &str {
        self.languages.first().map(String::as_str).unwrap_or("pl")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.languages.is_empty() {
            return Err("languages must not be empty".to_string());
        }
        if self.languages.iter().any(|l| l.trim().is_empty()) {
            return Err("languages must not contain empty codes".to_string());
        }
        if self.source.url.is_empty() {
            return Err("source.url must not be empty".to_string());
        }
        if !self.source.book.is_item() {
            return Err(format!("source.book must be an item id, got {}", self.source.book));
        }
        if self.limit == Some(0) {
            return Err("limit must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ImporterError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate().map_err(ImporterError::Config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ImporterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ImporterError> {
        toml::to_string_pretty(self)
            .map_err(|e| ImporterError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ImporterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.primary_language(), "pl");
        assert_eq!(config.properties.instance_of.as_str(), "P47");
        assert_eq!(config.classes.human.as_str(), "Q32");
    }

    #[test]
    fn test_partial_override() {
        let toml_str = r#"
            languages = ["pl"]
            limit = 10

            [properties]
            position_held = "P90"

            [source]
            volume = "3"
        "#;

        let config = ImporterConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.properties.position_held.as_str(), "P90");
        assert_eq!(config.properties.start_time.as_str(), "P203");
        assert_eq!(config.source.volume, "3");
        assert_eq!(config.source.notebook, "2");
        assert_eq!(config.limit, Some(10));
    }

    #[test]
    fn test_rejects_malformed_id() {
        let toml_str = r#"
            [classes]
            human = "human"
        "#;
        assert!(matches!(ImporterConfig::from_toml(toml_str), Err(ImporterError::Config(_))));
    }

    #[test]
    fn test_invalid_limit() {
        let mut config = ImporterConfig::default();
        config.limit = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_languages() {
        let mut config = ImporterConfig::default();
        config.languages.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ImporterConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ImporterConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabulary.toml");
        std::fs::write(&path, "[classes]\nposition = \"Q650\"\n").unwrap();

        let config = ImporterConfig::from_file(&path).unwrap();
        assert_eq!(config.classes.position.as_str(), "Q650");
    }
}
