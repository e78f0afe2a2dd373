//! Configuration file support for fitcoach.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitcoach/config.toml`.

use crate::matcher::MatchPolicy;
use crate::{CatalogKind, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalogs: CatalogConfig,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub enrich: EnrichConfig,
}

/// Optional CSV files replacing the built-in catalogs
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yoga: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meditations: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn path_for(&self, kind: CatalogKind) -> Option<&Path> {
        match kind {
            CatalogKind::Exercise => self.exercises.as_deref(),
            CatalogKind::Yoga => self.yoga.as_deref(),
            CatalogKind::Meditation => self.meditations.as_deref(),
        }
    }
}

/// Per-catalog match policies
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_exercise_policy")]
    pub exercises: MatchPolicy,

    #[serde(default = "default_yoga_policy")]
    pub yoga: MatchPolicy,

    #[serde(default = "default_meditation_policy")]
    pub meditations: MatchPolicy,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            exercises: default_exercise_policy(),
            yoga: default_yoga_policy(),
            meditations: default_meditation_policy(),
        }
    }
}

impl MatchingConfig {
    pub fn policy_for(&self, kind: CatalogKind) -> MatchPolicy {
        match kind {
            CatalogKind::Exercise => self.exercises,
            CatalogKind::Yoga => self.yoga,
            CatalogKind::Meditation => self.meditations,
        }
    }
}

/// Plan enrichment options
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct EnrichConfig {
    /// Copy the catalog description into items the generator left blank
    #[serde(default)]
    pub backfill_descriptions: bool,
}

// Default value functions
fn default_exercise_policy() -> MatchPolicy {
    MatchPolicy::default_for(CatalogKind::Exercise)
}

fn default_yoga_policy() -> MatchPolicy {
    MatchPolicy::default_for(CatalogKind::Yoga)
}

fn default_meditation_policy() -> MatchPolicy {
    MatchPolicy::default_for(CatalogKind::Meditation)
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("HOME environment variable not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("fitcoach").join("config.toml"))
    }

    /// Check every match policy threshold
    pub fn validate(&self) -> Result<()> {
        for kind in CatalogKind::ALL {
            self.matching
                .policy_for(kind)
                .validate()
                .map_err(|e| Error::Config(format!("[matching] {}: {}", kind, e)))?;
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
