//! Configuration
//!
//! Loaded from .flashcards.yml or ~/.config/flashcards/flashcards.yml

use crate::error::{FlashcardError, Result};
use crate::models::{ReviewPolicy, Timestamp};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG: &str = ".flashcards.yml";

/// 1980-01-01. Stored review times before this are leftovers, not real reviews.
pub const DEFAULT_LEGACY_TIMESTAMP_FLOOR: Timestamp = 315_532_800;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// SQLite database file.
    pub database: PathBuf,

    /// Scheduling constants.
    pub scheduling: ReviewPolicy,

    /// Timestamps below this are repaired by `flashcards repair`.
    pub legacy_timestamp_floor: Timestamp,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("db.sqlite3"),
            scheduling: ReviewPolicy::default(),
            legacy_timestamp_floor: DEFAULT_LEGACY_TIMESTAMP_FLOOR,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .flashcards.yml in current directory
    /// 3. ~/.config/flashcards/flashcards.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let project_config = PathBuf::from(PROJECT_CONFIG);
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    info!("Loaded config from {PROJECT_CONFIG}");
                    return Ok(config);
                }
                Err(e) => warn!("Failed to load {PROJECT_CONFIG}: {e}"),
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("flashcards").join("flashcards.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => warn!("Failed to load {}: {e}", user_config.display()),
                }
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let policy = &self.scheduling;
        if policy.initial_interval_secs <= 0 {
            return Err(FlashcardError::Config(
                "scheduling.initial-interval-secs must be > 0".to_string(),
            ));
        }
        if policy.failure_interval_secs <= 0 {
            return Err(FlashcardError::Config(
                "scheduling.failure-interval-secs must be > 0".to_string(),
            ));
        }
        if policy.success_multiplier < 1 {
            return Err(FlashcardError::Config(
                "scheduling.success-multiplier must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database, PathBuf::from("db.sqlite3"));
        assert_eq!(config.scheduling.initial_interval_secs, 30);
        assert_eq!(config.scheduling.failure_interval_secs, 30);
        assert_eq!(config.scheduling.success_multiplier, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flashcards.yml");
        fs::write(
            &path,
            "database: /tmp/cards.sqlite3\nscheduling:\n  failure-interval-secs: 300\n",
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.database, PathBuf::from("/tmp/cards.sqlite3"));
        assert_eq!(config.scheduling.failure_interval_secs, 300);
        assert_eq!(config.scheduling.initial_interval_secs, 30);
        assert_eq!(config.legacy_timestamp_floor, DEFAULT_LEGACY_TIMESTAMP_FLOOR);
    }

    #[test]
    fn test_rejects_invalid_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flashcards.yml");
        fs::write(&path, "scheduling:\n  success-multiplier: 0\n").unwrap();

        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(FlashcardError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/flashcards.yml")));
        assert!(matches!(result, Err(FlashcardError::Io(_))));
    }

    #[test]
    fn test_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flashcards.yml");
        fs::write(&path, "scheduling: [not, a, map]\n").unwrap();

        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(FlashcardError::Yaml(_))
        ));
    }
}
