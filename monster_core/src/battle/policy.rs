//! Action policies - How a side picks its action each turn

use super::Action;
use crate::monster::Monster;
use crate::team::MonsterTeam;
use std::fmt;

/// Chooses an action for one side of a battle
pub trait ActionPolicy: fmt::Debug {
    fn choose_action(&mut self, active: &Monster, enemy: &Monster, team: &MonsterTeam) -> Action;
}

/// Always attacks
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAttack;

impl ActionPolicy for AlwaysAttack {
    fn choose_action(&mut self, _active: &Monster, _enemy: &Monster, _team: &MonsterTeam) -> Action {
        Action::Attack
    }
}

/// Attacks while at least as fast or as healthy as the enemy, otherwise
/// swaps out. Never swaps with nobody left to swap in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedOrHealthPolicy;

impl ActionPolicy for SpeedOrHealthPolicy {
    fn choose_action(&mut self, active: &Monster, enemy: &Monster, team: &MonsterTeam) -> Action {
        if team.is_empty() || active.speed() >= enemy.speed() || active.hp() >= enemy.hp() {
            Action::Attack
        } else {
            Action::Swap
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::monster::{Catalog, MonsterKind};
    use crate::stats::{ComplexStats, SimpleStats, StatMode};
    use crate::team::TeamMode;

    fn kind(name: &str, speed: u32, max_hp: u32) -> MonsterKind {
        MonsterKind {
            name: name.to_string(),
            description: String::new(),
            element: Element::Normal,
            evolution: None,
            can_be_spawned: true,
            simple: SimpleStats::new(3, 3, speed, max_hp),
            complex: ComplexStats::new("1", "1", "1", "1").unwrap(),
        }
    }

    #[test]
    fn test_speed_or_health() {
        let catalog = Catalog::new(vec![kind("Quick", 9, 4), kind("Slow", 2, 9)]).unwrap();
        let quick = catalog.spawn("Quick", StatMode::Simple, 1).unwrap();
        let mut slow = catalog.spawn("Slow", StatMode::Simple, 1).unwrap();
        let bench = MonsterTeam::from_monsters(TeamMode::Back, vec![quick.clone()]).unwrap();
        let empty = MonsterTeam::from_monsters(TeamMode::Back, Vec::new()).unwrap();

        let mut policy = SpeedOrHealthPolicy;
        assert_eq!(policy.choose_action(&quick, &slow, &bench), Action::Attack);
        // Slower but healthier
        assert_eq!(policy.choose_action(&slow, &quick, &bench), Action::Attack);

        slow.set_hp(3);
        assert_eq!(policy.choose_action(&slow, &quick, &bench), Action::Swap);
        assert_eq!(policy.choose_action(&slow, &quick, &empty), Action::Attack);
    }

    #[test]
    fn test_always_attack() {
        let catalog = Catalog::new(vec![kind("Slow", 1, 1), kind("Quick", 9, 9)]).unwrap();
        let slow = catalog.spawn("Slow", StatMode::Simple, 1).unwrap();
        let quick = catalog.spawn("Quick", StatMode::Simple, 1).unwrap();
        let bench = MonsterTeam::from_monsters(TeamMode::Front, vec![quick.clone()]).unwrap();
        assert_eq!(AlwaysAttack.choose_action(&slow, &quick, &bench), Action::Attack);
    }
}
