use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fusion::PairOrder;

/// Fuser settings as read from a config file or the command line.
/// Every field is optional so the two sources can be layered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuseSettings {
    pub first_dir: Option<PathBuf>,
    pub second_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub order: Option<PairOrder>,
}

impl FuseSettings {
    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: FuseSettings) -> Self {
        Self {
            first_dir: overrides.first_dir.or(self.first_dir),
            second_dir: overrides.second_dir.or(self.second_dir),
            output_dir: overrides.output_dir.or(self.output_dir),
            order: overrides.order.or(self.order),
        }
    }

    /// Check that every path is present
    pub fn resolve(self) -> Result<FuseConfig> {
        let first_dir = self
            .first_dir
            .ok_or_else(|| anyhow::anyhow!("Missing setting: first_dir"))?;
        let second_dir = self
            .second_dir
            .ok_or_else(|| anyhow::anyhow!("Missing setting: second_dir"))?;
        let output_dir = self
            .output_dir
            .ok_or_else(|| anyhow::anyhow!("Missing setting: output_dir"))?;
        Ok(FuseConfig {
            first_dir,
            second_dir,
            output_dir,
            order: self.order.unwrap_or_default(),
        })
    }
}

/// Complete fuser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuseConfig {
    /// Folder whose lower halves end up on top
    pub first_dir: PathBuf,
    /// Folder whose upper halves end up at the bottom
    pub second_dir: PathBuf,
    pub output_dir: PathBuf,
    pub order: PairOrder,
}

impl FuseConfig {
    pub fn new(
        first_dir: impl AsRef<Path>,
        second_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            first_dir: first_dir.as_ref().to_path_buf(),
            second_dir: second_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            order: PairOrder::default(),
        }
    }

    pub fn with_order(mut self, order: PairOrder) -> Self {
        self.order = order;
        self
    }
}
