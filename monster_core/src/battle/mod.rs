//! Battle - Turn engine driving two teams to a result

mod engine;
mod policy;
mod report;

pub use engine::{Battle, BattleSession};
pub use policy::{ActionPolicy, AlwaysAttack, SpeedOrHealthPolicy};
pub use report::{BattleReport, CombatantSnapshot, TurnSnapshot};

use crate::monster::MonsterError;
use crate::team::TeamError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a side does with its active monster this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Attack,
    /// Return the active monster and send out the next one
    Swap,
    /// Return the active monster, reorder the team, send out the next one
    Special,
}

/// Terminal outcome of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleResult {
    Team1,
    Team2,
    Draw,
}

#[derive(Error, Debug)]
pub enum BattleError {
    #[error(transparent)]
    Team(#[from] TeamError),
    #[error(transparent)]
    Monster(#[from] MonsterError),
}
