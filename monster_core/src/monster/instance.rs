//! Monster - A leveled instance of a kind

use super::damage::calculate_damage;
use super::kind::{Catalog, MonsterKind};
use super::MonsterError;
use crate::element::{Element, EffectivenessTable};
use crate::stats::{StatMode, Stats};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One combatant. Identity lives in the shared `MonsterKind`; only level,
/// HP and stat mode belong to the instance.
#[derive(Debug, Clone)]
pub struct Monster {
    kind: Arc<MonsterKind>,
    mode: StatMode,
    level: u32,
    /// Level at creation or last evolution
    base_level: u32,
    hp: u32,
}

impl Monster {
    /// Create an instance at full HP. Level is raised to at least 1.
    pub fn new(kind: Arc<MonsterKind>, mode: StatMode, level: u32) -> Self {
        let level = level.max(1);
        let mut monster = Monster {
            kind,
            mode,
            level,
            base_level: level,
            hp: 0,
        };
        monster.hp = monster.max_hp();
        monster
    }

    fn stats(&self) -> &dyn Stats {
        match self.mode {
            StatMode::Simple => &self.kind.simple,
            StatMode::Complex => &self.kind.complex,
        }
    }

    // === Identity ===

    pub fn kind(&self) -> &Arc<MonsterKind> {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.kind.name
    }

    pub fn description(&self) -> &str {
        &self.kind.description
    }

    pub fn element(&self) -> Element {
        self.kind.element
    }

    pub fn evolution(&self) -> Option<&str> {
        self.kind.evolution.as_deref()
    }

    pub fn can_be_spawned(&self) -> bool {
        self.kind.can_be_spawned
    }

    pub fn stat_mode(&self) -> StatMode {
        self.mode
    }

    // === State ===

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Set current HP, capped at max HP
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp());
    }

    pub fn alive(&self) -> bool {
        self.hp > 0
    }

    /// Lose `amount` HP, stopping at 0
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    // === Stats ===

    pub fn attack_stat(&self) -> u32 {
        self.stats().attack(self.level)
    }

    pub fn defense(&self) -> u32 {
        self.stats().defense(self.level)
    }

    pub fn speed(&self) -> u32 {
        self.stats().speed(self.level)
    }

    pub fn max_hp(&self) -> u32 {
        self.stats().max_hp(self.level)
    }

    // === Transitions ===

    /// Attack `other`, returning the damage dealt
    pub fn attack(&self, other: &mut Monster, table: &EffectivenessTable) -> u32 {
        let multiplier = table.effectiveness(self.element(), other.element());
        let damage = calculate_damage(self.attack_stat(), other.defense(), multiplier);
        other.take_damage(damage);
        debug!(
            attacker = self.name(),
            defender = other.name(),
            damage,
            multiplier,
            remaining = other.hp,
            "attack"
        );
        damage
    }

    /// Gain a level. The max-HP gain is added to current HP; a formula that
    /// shrinks max HP never takes HP away.
    pub fn level_up(&mut self) {
        let old_max = self.max_hp();
        self.level += 1;
        let new_max = self.max_hp();
        self.hp += new_max.saturating_sub(old_max);
        debug!(name = self.name(), level = self.level, hp = self.hp, "level up");
    }

    /// Gained a level since creation or last evolution, and has somewhere to go
    pub fn ready_to_evolve(&self) -> bool {
        self.level > self.base_level && self.kind.evolution.is_some()
    }

    /// Produce the evolved instance, keeping level, stat mode and HP deficit
    pub fn evolve(&self, catalog: &Catalog) -> Result<Monster, MonsterError> {
        let target = match (&self.kind.evolution, self.ready_to_evolve()) {
            (Some(target), true) => target,
            _ => {
                return Err(MonsterError::CannotEvolve {
                    name: self.name().to_string(),
                })
            }
        };

        let mut evolved = Monster::new(catalog.kind(target)?, self.mode, self.level);
        let deficit = self.max_hp().saturating_sub(self.hp);
        evolved.hp = evolved.max_hp().saturating_sub(deficit);
        debug!(from = self.name(), to = evolved.name(), hp = evolved.hp, "evolved");
        Ok(evolved)
    }
}

impl fmt::Display for Monster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LV.{} {}, {}/{} HP",
            self.level,
            self.name(),
            self.hp,
            self.max_hp()
        )
    }
}
