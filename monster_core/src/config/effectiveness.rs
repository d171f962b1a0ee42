//! Effectiveness matrix loading

use super::ConfigError;
use crate::element::{EffectivenessTable, Element};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw matrix as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectivenessConfig {
    /// Row and column order of `matrix`
    pub elements: Vec<Element>,
    /// `matrix[attacker][defender]`
    pub matrix: Vec<Vec<f64>>,
}

impl EffectivenessConfig {
    pub fn into_table(self) -> Result<EffectivenessTable, ConfigError> {
        EffectivenessTable::from_rows(&self.elements, &self.matrix).map_err(ConfigError::ValidationError)
    }
}

/// Load the effectiveness table from a TOML file
pub fn load_effectiveness(path: &Path) -> Result<EffectivenessTable, ConfigError> {
    let config: EffectivenessConfig = super::load_toml(path)?;
    config.into_table()
}

/// Load the effectiveness table from a TOML string
pub fn parse_effectiveness(content: &str) -> Result<EffectivenessTable, ConfigError> {
    let config: EffectivenessConfig = super::parse_toml(content)?;
    config.into_table()
}

/// Get the bundled effectiveness table
pub fn default_effectiveness() -> EffectivenessTable {
    let toml = include_str!("../../config/effectiveness.toml");
    parse_effectiveness(toml).unwrap_or_default()
}
