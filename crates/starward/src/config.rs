//! # Engine Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file is a valid configuration.
//!
//! ```toml
//! [grid]
//! cell_size = 128.0
//! accelerated = true
//!
//! [collision]
//! accelerated = true
//!
//! [collision.capacities]
//! projectiles = 400
//! enemies = 250
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use starward_core::ChannelCapacities;
use starward_spatial::DEFAULT_CELL_SIZE;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Grid settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Cell edge length in world units.
    pub cell_size: f64,
    /// Use the sorted-run index, falling back to the hash index on error.
    pub accelerated: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            accelerated: true,
        }
    }
}

/// Collision settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollisionConfig {
    /// Use the shared buffer backend, falling back to the reference backend on error.
    pub accelerated: bool,
    /// Initial shared buffer capacities in records.
    pub capacities: ChannelCapacities,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            accelerated: true,
            capacities: ChannelCapacities::default(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Grid settings.
    pub grid: GridConfig,
    /// Collision settings.
    pub collision: CollisionConfig,
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "engine configuration loaded");
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if the cell size is not finite and positive,
    /// or if any buffer capacity exceeds [`ChannelCapacities::MAX_RECORDS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cell = self.grid.cell_size;
        if !(cell.is_finite() && cell > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid.cell_size must be finite and positive, got {cell}"
            )));
        }

        let limit = ChannelCapacities::MAX_RECORDS;
        if let Some((name, value)) = self
            .collision
            .capacities
            .entries()
            .into_iter()
            .find(|&(_, value)| value > limit)
        {
            return Err(ConfigError::Invalid(format!(
                "collision.capacities.{name} must be at most {limit}, got {value}"
            )));
        }
        Ok(())
    }
}
