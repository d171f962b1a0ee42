//! MonsterKind and Catalog - Immutable per-kind descriptors and their registry

use super::{Monster, MonsterError};
use crate::element::Element;
use crate::stats::{ComplexStats, SimpleStats, StatMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Template shared by every instance of one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterKind {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub element: Element,
    /// Name of the kind this one evolves into
    #[serde(default)]
    pub evolution: Option<String>,
    #[serde(default)]
    pub can_be_spawned: bool,
    pub simple: SimpleStats,
    pub complex: ComplexStats,
}

/// Ordered registry of monster kinds, keyed by name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    kinds: Vec<Arc<MonsterKind>>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, checking names are unique and every evolution target exists
    pub fn new(kinds: Vec<MonsterKind>) -> Result<Self, MonsterError> {
        let mut by_name = HashMap::with_capacity(kinds.len());
        for (idx, kind) in kinds.iter().enumerate() {
            if by_name.insert(kind.name.clone(), idx).is_some() {
                return Err(MonsterError::DuplicateKind(kind.name.clone()));
            }
        }
        for kind in &kinds {
            if let Some(target) = &kind.evolution {
                if !by_name.contains_key(target) {
                    return Err(MonsterError::UnknownEvolution {
                        kind: kind.name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(Catalog {
            kinds: kinds.into_iter().map(Arc::new).collect(),
            by_name,
        })
    }

    /// All kinds in catalog order
    pub fn all(&self) -> &[Arc<MonsterKind>] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Get a kind by name
    pub fn get(&self, name: &str) -> Option<&Arc<MonsterKind>> {
        self.by_name.get(name).map(|&idx| &self.kinds[idx])
    }

    /// Get a kind by name, failing with `UnknownKind`
    pub fn kind(&self, name: &str) -> Result<Arc<MonsterKind>, MonsterError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| MonsterError::UnknownKind(name.to_string()))
    }

    /// Spawnable kinds, in catalog order
    pub fn spawnable(&self) -> impl Iterator<Item = &Arc<MonsterKind>> {
        self.kinds.iter().filter(|k| k.can_be_spawned)
    }

    pub fn spawnable_count(&self) -> usize {
        self.spawnable().count()
    }

    /// The `index`-th spawnable kind (zero-based)
    pub fn nth_spawnable(&self, index: usize) -> Option<&Arc<MonsterKind>> {
        self.spawnable().nth(index)
    }

    /// Create a fresh instance of the named kind
    pub fn spawn(&self, name: &str, mode: StatMode, level: u32) -> Result<Monster, MonsterError> {
        Ok(Monster::new(self.kind(name)?, mode, level))
    }
}
