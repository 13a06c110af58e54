//! Engine and game configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MineError, MineResult, ValidationError};
use crate::grid::GridBounds;

/// Knobs for the inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Derive new statements from subset/superset pairs.
    ///
    /// When disabled only direct resolution runs (count 0 or count == size).
    pub subsumption: bool,
    /// Keep a derivation record for every conclusion.
    pub record_derivations: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            subsumption: true,
            record_derivations: true,
        }
    }
}

/// A single game: board dimensions, hazard count, RNG seed, engine knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
    /// Number of hazards placed on the board.
    pub hazards: usize,
    /// RNG seed; a fresh entropy seed is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Inference engine settings.
    pub engine: EngineConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            hazards: 8,
            seed: None,
            engine: EngineConfig::default(),
        }
    }
}

impl GameConfig {
    /// Validate the configuration.
    ///
    /// The board must be non-empty and must leave at least one safe cell.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let bounds = self.bounds()?;
        if self.hazards >= bounds.cell_count() {
            return Err(ValidationError::InvalidConfig {
                reason: format!(
                    "hazards ({}) must be fewer than the {} cells of the board",
                    self.hazards,
                    bounds.cell_count()
                ),
            });
        }
        Ok(())
    }

    /// Grid bounds described by this configuration.
    pub fn bounds(&self) -> Result<GridBounds, ValidationError> {
        GridBounds::new(self.height, self.width)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> MineResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MineError::config(format!("invalid game config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> MineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| MineError::config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }
}
