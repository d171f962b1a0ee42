//! SimpleStats - Flat stats that ignore level

use super::Stats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleStats {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub max_hp: u32,
}

impl SimpleStats {
    pub fn new(attack: u32, defense: u32, speed: u32, max_hp: u32) -> Self {
        SimpleStats {
            attack,
            defense,
            speed,
            max_hp,
        }
    }
}

impl Stats for SimpleStats {
    fn attack(&self, _level: u32) -> u32 {
        self.attack
    }

    fn defense(&self, _level: u32) -> u32 {
        self.defense
    }

    fn speed(&self, _level: u32) -> u32 {
        self.speed
    }

    fn max_hp(&self, _level: u32) -> u32 {
        self.max_hp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_stats() {
        let ss = SimpleStats::new(8, 2, 4, 12);
        assert_eq!(ss.attack(1), 8);
        assert_eq!(ss.defense(1), 2);
        assert_eq!(ss.speed(1), 4);
        assert_eq!(ss.max_hp(1), 12);
    }

    #[test]
    fn test_simple_stats_ignore_level() {
        let ss = SimpleStats::new(8, 2, 4, 12);
        assert_eq!(ss.max_hp(1), ss.max_hp(50));
    }
}
