//! Elements and the attacker/defender effectiveness table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of elements in the closed element set
pub const ELEMENT_COUNT: usize = 18;

/// Monster element. Declaration order is the enum index used for ordering
/// query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Grass,
    Bug,
    Dragon,
    Electric,
    Fighting,
    Flying,
    Ghost,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Fairy,
    Dark,
    Steel,
}

impl Element {
    /// Get all elements in index order
    pub fn all() -> &'static [Element; ELEMENT_COUNT] {
        &[
            Element::Fire,
            Element::Water,
            Element::Grass,
            Element::Bug,
            Element::Dragon,
            Element::Electric,
            Element::Fighting,
            Element::Flying,
            Element::Ghost,
            Element::Ground,
            Element::Ice,
            Element::Normal,
            Element::Poison,
            Element::Psychic,
            Element::Rock,
            Element::Fairy,
            Element::Dark,
            Element::Steel,
        ]
    }

    /// Zero-based position in the element set
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Grass => "Grass",
            Element::Bug => "Bug",
            Element::Dragon => "Dragon",
            Element::Electric => "Electric",
            Element::Fighting => "Fighting",
            Element::Flying => "Flying",
            Element::Ghost => "Ghost",
            Element::Ground => "Ground",
            Element::Ice => "Ice",
            Element::Normal => "Normal",
            Element::Poison => "Poison",
            Element::Psychic => "Psychic",
            Element::Rock => "Rock",
            Element::Fairy => "Fairy",
            Element::Dark => "Dark",
            Element::Steel => "Steel",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element name that matched nothing in the element set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown element: {0}")]
pub struct UnknownElement(pub String);

impl FromStr for Element {
    type Err = UnknownElement;

    /// Case-insensitive lookup by name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::all()
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownElement(s.to_string()))
    }
}

/// Dense multiplier matrix indexed by (attacker, defender)
#[derive(Debug, Clone, PartialEq)]
pub struct EffectivenessTable {
    values: [f64; ELEMENT_COUNT * ELEMENT_COUNT],
}

impl EffectivenessTable {
    /// A table where every matchup is neutral (1.0)
    pub fn neutral() -> Self {
        EffectivenessTable {
            values: [1.0; ELEMENT_COUNT * ELEMENT_COUNT],
        }
    }

    /// Build a table from a header of element names and a row-major matrix.
    ///
    /// `header[i]` names both row `i` (attacker) and column `i` (defender).
    /// The header must name every element exactly once.
    pub fn from_rows(header: &[Element], rows: &[Vec<f64>]) -> Result<Self, String> {
        if header.len() != ELEMENT_COUNT {
            return Err(format!(
                "expected {} elements in header, found {}",
                ELEMENT_COUNT,
                header.len()
            ));
        }
        let mut seen = [false; ELEMENT_COUNT];
        for element in header {
            if seen[element.index()] {
                return Err(format!("element {} listed twice", element));
            }
            seen[element.index()] = true;
        }
        if rows.len() != header.len() {
            return Err(format!(
                "expected {} rows, found {}",
                header.len(),
                rows.len()
            ));
        }

        let mut table = Self::neutral();
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(format!(
                    "row {} ({}) has {} values, expected {}",
                    row_idx,
                    header[row_idx],
                    row.len(),
                    header.len()
                ));
            }
            for (col_idx, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(format!(
                        "invalid multiplier {} for {} -> {}",
                        value, header[row_idx], header[col_idx]
                    ));
                }
                table.set(header[row_idx], header[col_idx], value);
            }
        }
        Ok(table)
    }

    /// Multiplier applied when `attacker` hits `defender`
    pub fn effectiveness(&self, attacker: Element, defender: Element) -> f64 {
        self.values[attacker.index() * ELEMENT_COUNT + defender.index()]
    }

    /// Override a single matchup
    pub fn set(&mut self, attacker: Element, defender: Element, value: f64) {
        self.values[attacker.index() * ELEMENT_COUNT + defender.index()] = value;
    }
}

impl Default for EffectivenessTable {
    fn default() -> Self {
        Self::neutral()
    }
}
