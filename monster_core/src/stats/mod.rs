//! Stats - Per-kind stat providers
//!
//! Every monster kind carries two providers: flat `SimpleStats` and
//! level-parameterized `ComplexStats`. Each instance picks one via `StatMode`.

mod complex;
mod simple;

pub use complex::{ComplexStats, Formula, StatError};
pub use simple::SimpleStats;

use serde::{Deserialize, Serialize};

/// Anything that can answer the four combat stats for a given level
pub trait Stats {
    fn attack(&self, level: u32) -> u32;
    fn defense(&self, level: u32) -> u32;
    fn speed(&self, level: u32) -> u32;
    fn max_hp(&self, level: u32) -> u32;
}

/// Which provider an instance reads its stats from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatMode {
    #[default]
    Simple,
    Complex,
}
