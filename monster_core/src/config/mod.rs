//! Configuration loading from TOML files

mod constants;
mod effectiveness;
mod monsters;

pub use constants::{BattleConstants, GameConstants, TowerConstants};
pub use effectiveness::{default_effectiveness, load_effectiveness, parse_effectiveness};
pub use monsters::{default_catalog, load_catalog, parse_catalog};

use crate::monster::MonsterError;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
    #[error("Invalid monster catalog: {0}")]
    Catalog(#[from] MonsterError),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load game constants from a TOML file; missing sections use defaults
pub fn load_constants(path: &Path) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = load_toml(path)?;
    validate_constants(&constants)?;
    Ok(constants)
}

/// Get the bundled game constants
pub fn default_constants() -> GameConstants {
    let toml = include_str!("../../config/constants.toml");
    parse_toml::<GameConstants>(toml)
        .ok()
        .filter(|c| validate_constants(c).is_ok())
        .unwrap_or_default()
}

fn validate_constants(constants: &GameConstants) -> Result<(), ConfigError> {
    let tower = &constants.tower;
    if tower.min_lives == 0 || tower.min_lives > tower.max_lives {
        return Err(ConfigError::ValidationError(format!(
            "tower lives range {}..={} is empty or starts at 0",
            tower.min_lives, tower.max_lives
        )));
    }
    Ok(())
}
