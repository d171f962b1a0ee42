//! Monsters - Kind registry, instances and the damage curve

mod damage;
mod instance;
mod kind;

pub use damage::{calculate_damage, raw_damage};
pub use instance::Monster;
pub use kind::{Catalog, MonsterKind};

use thiserror::Error;

/// Monster and catalog errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonsterError {
    #[error("{name} is not ready to evolve")]
    CannotEvolve { name: String },
    #[error("unknown monster kind: {0}")]
    UnknownKind(String),
    #[error("monster kind {0} is defined more than once")]
    DuplicateKind(String),
    #[error("{kind} evolves into unknown kind {target}")]
    UnknownEvolution { kind: String, target: String },
}
