//! Prelude module for convenient imports
//!
//! ```rust
//! use monster_core::prelude::*;
//! ```

// Monsters
pub use crate::element::{EffectivenessTable, Element};
pub use crate::monster::{Catalog, Monster, MonsterKind};
pub use crate::stats::StatMode;

// Teams
pub use crate::team::{LinePrompter, MonsterTeam, Selection, SelectionInput, SortKey, TeamMode};

// Battles
pub use crate::battle::{Action, ActionPolicy, AlwaysAttack, Battle, BattleResult, SpeedOrHealthPolicy};

// Tower
pub use crate::rng::RandomGen;
pub use crate::tower::{tournament_balanced, BattleTower, TowerRound};

// Config
pub use crate::config::{default_catalog, default_constants, default_effectiveness, GameConstants};
