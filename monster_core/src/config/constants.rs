//! Game constants configuration

use crate::team::TeamMode;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub battle: BattleConstants,
    #[serde(default)]
    pub tower: TowerConstants,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConstants {
    /// HP both active monsters lose when a turn ends with neither fainted
    #[serde(default = "default_attrition_hp")]
    pub attrition_hp: u32,
}

impl Default for BattleConstants {
    fn default() -> Self {
        BattleConstants {
            attrition_hp: default_attrition_hp(),
        }
    }
}

fn default_attrition_hp() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerConstants {
    /// Fewest lives a tower team can be given
    #[serde(default = "default_min_lives")]
    pub min_lives: u32,
    /// Most lives a tower team can be given
    #[serde(default = "default_max_lives")]
    pub max_lives: u32,
    /// Discipline generated opponents use
    #[serde(default = "default_opponent_mode")]
    pub opponent_mode: TeamMode,
}

impl Default for TowerConstants {
    fn default() -> Self {
        TowerConstants {
            min_lives: default_min_lives(),
            max_lives: default_max_lives(),
            opponent_mode: default_opponent_mode(),
        }
    }
}

fn default_min_lives() -> u32 {
    2
}
fn default_max_lives() -> u32 {
    10
}
fn default_opponent_mode() -> TeamMode {
    TeamMode::Back
}
