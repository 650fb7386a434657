use std::io::Read;
use std::path::PathBuf;

use crate::core::{GameError, GameSettings};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] GameError),
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub game: GameSettings,
    #[serde(default)]
    pub interface: Interface,
    /// Fixed seed for tile spawns; omitted means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Interface {
    /// Minimum drag length, in terminal cells, before a mouse drag counts as a move.
    #[serde(default = "defaults::swipe_threshold")]
    pub swipe_threshold: u16,
}

impl Default for Interface {
    fn default() -> Self {
        Interface {
            swipe_threshold: defaults::swipe_threshold(),
        }
    }
}

impl AppConfig {
    pub fn from_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.game.validate()?;
        Ok(cfg)
    }
}

mod defaults {
    pub fn swipe_threshold() -> u16 { 2 }
}
