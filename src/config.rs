//! Mask configuration persistence
//!
//! Stores mask options in `~/.config/inputmask/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::affinity::AffinityCalculationStrategy;
use crate::model::Notation;

/// Options shared by every mask of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskOptions {
    /// Alternative formats competing with the primary one
    #[serde(default, alias = "affineFormats")]
    pub affine_formats: Vec<String>,

    #[serde(default, alias = "customNotations")]
    pub custom_notations: Vec<Notation>,

    #[serde(default, alias = "affinityCalculationStrategy")]
    pub affinity_calculation_strategy: AffinityCalculationStrategy,

    /// Append literals after typed text
    #[serde(default = "default_autocomplete")]
    pub autocomplete: bool,

    /// Remove literals in front of the caret on deletion
    #[serde(default)]
    pub autoskip: bool,

    #[serde(default, alias = "rightToLeft")]
    pub right_to_left: bool,
}

fn default_autocomplete() -> bool {
    true
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            affine_formats: Vec::new(),
            custom_notations: Vec::new(),
            affinity_calculation_strategy: AffinityCalculationStrategy::default(),
            autocomplete: default_autocomplete(),
            autoskip: false,
            right_to_left: false,
        }
    }
}

/// Configuration file contents: an optional primary format plus its options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(flatten)]
    pub options: MaskOptions,
}

/// Errors loading an explicitly requested config file
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "failed to read {}: {}", path, source),
            Self::Parse(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
        }
    }
}

impl MaskConfig {
    /// Load config from the default location, or return defaults if absent or broken
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from `path`; any failure is returned to the caller
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes as YAML null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
