//! BattleReport - Outcome and per-turn log of one battle

use super::{Action, BattleResult};
use crate::monster::Monster;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Active monster as it stood at the start of a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
}

impl From<&Monster> for CombatantSnapshot {
    fn from(monster: &Monster) -> Self {
        CombatantSnapshot {
            name: monster.name().to_string(),
            level: monster.level(),
            hp: monster.hp(),
            max_hp: monster.max_hp(),
        }
    }
}

impl fmt::Display for CombatantSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LV.{} {}, {}/{} HP", self.level, self.name, self.hp, self.max_hp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    /// 1-based turn number
    pub turn: u32,
    pub team1: CombatantSnapshot,
    pub team2: CombatantSnapshot,
    pub action1: Action,
    pub action2: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub result: BattleResult,
    pub turns: u32,
    pub log: Vec<TurnSnapshot>,
}

impl BattleReport {
    /// Display strings of both active monsters per turn
    pub fn lines(&self) -> Vec<(String, String)> {
        self.log
            .iter()
            .map(|t| (t.team1.to_string(), t.team2.to_string()))
            .collect()
    }
}
