// config.rs - Per-game settings, loadable from JSON

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Settings every new [`Game`](crate::Game) starts from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fastest allowed step interval
    pub min_step_ms: u64,
    /// Slowest allowed step interval
    pub max_step_ms: u64,
    pub default_step_ms: u64,
    /// Show pending births/deaths instead of plain cells
    pub smart_mode: bool,
    pub initial_height: usize,
    pub initial_width: usize,
    /// Seed dashboard games with the glider board
    pub seed_glider: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_step_ms: 10,
            max_step_ms: 2000,
            default_step_ms: 1000,
            smart_mode: true,
            initial_height: 1,
            initial_width: 0,
            seed_glider: true,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> SimResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> SimResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.min_step_ms == 0 {
            return Err(SimError::InvalidConfig("min_step_ms must be positive".into()));
        }
        if self.min_step_ms > self.max_step_ms {
            return Err(SimError::InvalidConfig(format!(
                "min_step_ms {} exceeds max_step_ms {}",
                self.min_step_ms, self.max_step_ms
            )));
        }
        if !(self.min_step_ms..=self.max_step_ms).contains(&self.default_step_ms) {
            return Err(SimError::InvalidConfig(format!(
                "default_step_ms {} outside {}..={}",
                self.default_step_ms, self.min_step_ms, self.max_step_ms
            )));
        }
        Ok(())
    }

    pub fn clamp_step_ms(&self, ms: u64) -> u64 {
        ms.clamp(self.min_step_ms, self.max_step_ms)
    }
}
