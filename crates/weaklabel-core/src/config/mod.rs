//! Configuration management for weaklabel.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section is `#[serde(default)]`, so a config file only needs
//! the keys it overrides.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for weaklabel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Processing settings
    pub processing: ProcessingConfig,

    /// Per-source weighting factors
    pub weights: WeightsConfig,

    /// Ranking settings
    pub ranking: RankingConfig,

    /// Lemmatizer settings
    pub lemmatizer: LemmatizerConfig,

    /// Vocabulary settings
    pub vocabulary: VocabularyConfig,

    /// Word vector settings
    pub embedding: EmbeddingConfig,

    /// Term-frequency table settings
    pub term_frequency: TermFrequencyConfig,

    /// External candidate settings
    pub candidates: CandidatesConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.weaklabel.weaklabel/config.toml
    /// - Linux: ~/.config/weaklabel/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\weaklabel\config\config.toml
    ///
    /// Falls back to ~/.weaklabel/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "weaklabel", "weaklabel")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".weaklabel").join("config.toml")
            })
    }

    /// Get the resolved vocabulary directory path (with ~ expansion).
    pub fn vocabulary_dir(&self) -> PathBuf {
        expand(&self.vocabulary.dir)
    }

    /// Get the resolved word vectors path.
    pub fn embedding_path(&self) -> PathBuf {
        expand(&self.embedding.path)
    }

    /// Get the resolved term-frequency table path.
    pub fn term_frequency_path(&self) -> PathBuf {
        expand(&self.term_frequency.path)
    }

    /// Get the resolved external candidates path.
    pub fn candidates_path(&self) -> PathBuf {
        expand(&self.candidates.path)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagging::Strategy;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.processing.parallel_workers, 4);
        assert_eq!(config.ranking.top_k, 10);
        assert_eq!(config.ranking.strategy, Strategy::Hybrid);
        assert_eq!(config.lemmatizer.kind, LemmatizerKind::Morphy);
        assert!(!config.candidates.enabled);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[weights]"));
        assert!(toml.contains("[ranking]"));
        assert!(toml.contains("strategy = \"hybrid\""));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [weights]
            hashtag = 2.5

            [ranking]
            strategy = "syntactic"
            "#,
        )
        .unwrap();
        assert_eq!(config.weights.hashtag, 2.5);
        assert_eq!(config.weights.caption, 1.0);
        assert_eq!(config.ranking.strategy, Strategy::Syntactic);
        assert_eq!(config.ranking.top_k, 10);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = Config::from_toml("[ranking]\nstrategy = \"psychic\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[lemmatizer]\nkind = \"snowball\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.lemmatizer.kind, LemmatizerKind::Snowball);
    }
}
