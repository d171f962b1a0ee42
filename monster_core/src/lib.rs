//! monster_core - Core battle, team and tower simulation library
//!
//! This library provides:
//! - Monster: Leveled instances of catalog kinds, with evolution
//! - MonsterTeam: Capped rosters under stack, ring or priority discipline
//! - Battle: Turn engine driving two teams to a result
//! - BattleTower: Seeded elimination ladder against generated opponents

pub mod battle;
pub mod config;
pub mod element;
pub mod monster;
pub mod prelude;
pub mod rng;
pub mod stats;
pub mod team;
pub mod tower;

// Re-export core types for convenience
pub use battle::{Action, ActionPolicy, Battle, BattleError, BattleReport, BattleResult};
pub use config::{default_catalog, default_constants, default_effectiveness, GameConstants};
pub use element::{EffectivenessTable, Element};
pub use monster::{Catalog, Monster, MonsterError, MonsterKind};
pub use rng::RandomGen;
pub use stats::StatMode;
pub use team::{MonsterTeam, SelectionMode, SortKey, TeamError, TeamMode, TEAM_LIMIT};
pub use tower::{tournament_balanced, BattleTower, TowerError, TowerRound};
