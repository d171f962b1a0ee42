//! MonsterTeam - A capped roster under one of three retrieval disciplines
//!
//! - `Front`: stack, last added is retrieved first
//! - `Back`: circular queue, first added is retrieved first
//! - `Optimise`: priority list ordered by a `SortKey`, highest first
//!
//! The discipline is fixed at construction. Every team remembers its original
//! composition so `regenerate` can restore it between battles.

mod container;
mod selection;

pub use selection::{LinePrompter, Selection, SelectionInput, SelectionMode};

use crate::element::Element;
use crate::monster::Monster;
use container::{Container, PriorityList, Ring};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

/// Maximum number of monsters on a team
pub const TEAM_LIMIT: usize = 6;

/// Team errors
#[derive(Error, Debug)]
pub enum TeamError {
    #[error("team is full ({limit} monsters)")]
    CapacityExceeded { limit: usize },
    #[error("team is empty")]
    Empty,
    #[error("{provided} monsters provided, team limit is {limit}")]
    TooManyMonsters { provided: usize, limit: usize },
    #[error("{0} cannot be spawned")]
    NotSpawnable(String),
    #[error("catalog has no spawnable monsters")]
    NoSpawnableKinds,
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
    #[error("input ended before the team was complete")]
    InputExhausted,
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),
    #[error("selection input failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Stat a priority team is ordered by, read when a monster is added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Hp,
    Attack,
    Defense,
    Speed,
    Level,
}

impl SortKey {
    pub fn value(self, monster: &Monster) -> u32 {
        match self {
            SortKey::Hp => monster.hp(),
            SortKey::Attack => monster.attack_stat(),
            SortKey::Defense => monster.defense(),
            SortKey::Speed => monster.speed(),
            SortKey::Level => monster.level(),
        }
    }
}

impl FromStr for SortKey {
    type Err = TeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hp" => Ok(SortKey::Hp),
            "attack" => Ok(SortKey::Attack),
            "defense" => Ok(SortKey::Defense),
            "speed" => Ok(SortKey::Speed),
            "level" => Ok(SortKey::Level),
            _ => Err(TeamError::UnsupportedMode(s.to_string())),
        }
    }
}

/// Retrieval discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamMode {
    Front,
    Back,
    Optimise(SortKey),
}

impl FromStr for TeamMode {
    type Err = TeamError;

    /// Accepts `front`/`lifo`, `back`/`ring`, and `optimise[:key]`/`priority[:key]`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let (name, key) = match lowered.split_once(':') {
            Some((name, key)) => (name, Some(key)),
            None => (lowered.as_str(), None),
        };
        match (name, key) {
            ("front" | "lifo" | "stack", None) => Ok(TeamMode::Front),
            ("back" | "ring" | "fifo" | "queue", None) => Ok(TeamMode::Back),
            ("optimise" | "optimize" | "priority", None) => Ok(TeamMode::Optimise(SortKey::Hp)),
            ("optimise" | "optimize" | "priority", Some(key)) => Ok(TeamMode::Optimise(key.parse()?)),
            _ => Err(TeamError::UnsupportedMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonsterTeam {
    mode: TeamMode,
    container: Container,
    /// Original composition, replayed by `regenerate`
    roster: Vec<Monster>,
}

impl MonsterTeam {
    /// Build a team with the given selection strategy
    pub fn new(mode: TeamMode, selection: Selection<'_>) -> Result<Self, TeamError> {
        selection::select(mode, selection)
    }

    /// Build a team from pre-built instances, added in order
    pub fn from_monsters(mode: TeamMode, monsters: Vec<Monster>) -> Result<Self, TeamError> {
        if monsters.len() > TEAM_LIMIT {
            return Err(TeamError::TooManyMonsters {
                provided: monsters.len(),
                limit: TEAM_LIMIT,
            });
        }
        let mut team = MonsterTeam {
            mode,
            container: Self::empty_container(mode),
            roster: monsters,
        };
        team.regenerate();
        Ok(team)
    }

    fn empty_container(mode: TeamMode) -> Container {
        match mode {
            TeamMode::Front => Container::Stack(Vec::with_capacity(TEAM_LIMIT)),
            TeamMode::Back => Container::Ring(Ring::with_capacity(TEAM_LIMIT)),
            TeamMode::Optimise(key) => Container::Priority(PriorityList::new(key)),
        }
    }

    pub fn mode(&self) -> TeamMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= TEAM_LIMIT
    }

    /// Add a monster according to the team's discipline
    pub fn add(&mut self, monster: Monster) -> Result<(), TeamError> {
        if self.is_full() {
            return Err(TeamError::CapacityExceeded { limit: TEAM_LIMIT });
        }
        trace!(name = monster.name(), mode = ?self.mode, "add to team");
        self.container.push(monster);
        Ok(())
    }

    /// Take the next monster according to the team's discipline
    pub fn retrieve(&mut self) -> Result<Monster, TeamError> {
        let monster = self.container.pop().ok_or(TeamError::Empty)?;
        trace!(name = monster.name(), mode = ?self.mode, "retrieve from team");
        Ok(monster)
    }

    /// Discipline-specific reorder:
    /// - `Front`: the top three (or fewer) are reversed
    /// - `Back`: the back half is reversed and moved ahead of the front half
    /// - `Optimise`: the sort direction flips until `special` or `regenerate`
    pub fn special(&mut self) {
        self.container.special();
    }

    /// Restore the original composition with fresh copies of the original
    /// members, in the original order. Resets any `Optimise` flip.
    pub fn regenerate(&mut self) {
        self.container = Self::empty_container(self.mode);
        for monster in &self.roster {
            self.container.push(monster.clone());
        }
        trace!(mode = ?self.mode, len = self.len(), "regenerated team");
    }

    /// Original composition in construction order
    pub fn roster(&self) -> &[Monster] {
        &self.roster
    }

    /// Elements present in the original composition
    pub fn elements(&self) -> BTreeSet<Element> {
        self.roster.iter().map(Monster::element).collect()
    }

    /// Current members in retrieval order
    pub fn members(&self) -> Vec<&Monster> {
        self.container.members()
    }
}

impl fmt::Display for MonsterTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.members().iter().map(|m| m.name()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::{Catalog, MonsterKind};
    use crate::stats::{ComplexStats, SimpleStats, StatMode};
    use crate::Element;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn kind(name: &str, max_hp: u32) -> MonsterKind {
        MonsterKind {
            name: name.to_string(),
            description: String::new(),
            element: Element::Normal,
            evolution: None,
            can_be_spawned: true,
            simple: SimpleStats::new(5, 5, 5, max_hp),
            complex: ComplexStats::new("5", "5", "5", "5").unwrap(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            kind("Flamikin", 6),
            kind("Aquariuma", 8),
            kind("Vineon", 6),
            kind("Thundrake", 5),
            kind("Rockodile", 9),
            kind("Normake", 5),
        ])
        .unwrap()
    }

    fn team(mode: TeamMode, names: &[&str]) -> MonsterTeam {
        let catalog = catalog();
        let kinds: Vec<Option<Arc<MonsterKind>>> =
            names.iter().map(|n| catalog.get(n).cloned()).collect();
        MonsterTeam::new(mode, Selection::Provided(&kinds)).unwrap()
    }

    fn spawn(name: &str) -> Monster {
        catalog().spawn(name, StatMode::Simple, 1).unwrap()
    }

    fn drain(team: &mut MonsterTeam) -> Vec<String> {
        std::iter::from_fn(|| team.retrieve().ok())
            .map(|m| m.name().to_string())
            .collect()
    }

    #[test]
    fn test_front_mode() {
        let mut team = team(TeamMode::Front, &["Flamikin", "Aquariuma", "Vineon", "Thundrake"]);
        let thundrake = team.retrieve().unwrap();
        let vineon = team.retrieve().unwrap();
        assert_eq!(thundrake.name(), "Thundrake");
        assert_eq!(vineon.name(), "Vineon");
        team.add(thundrake).unwrap();
        team.add(vineon).unwrap();
        assert_eq!(team.retrieve().unwrap().name(), "Vineon");
        assert_eq!(team.retrieve().unwrap().name(), "Thundrake");

        // [Aquariuma, Flamikin] -> special -> [Flamikin, Aquariuma]
        team.special();
        assert_eq!(drain(&mut team), vec!["Flamikin", "Aquariuma"]);

        // [Thundrake, Vineon, Aquariuma, Flamikin] -> [Aquariuma, Vineon, Thundrake, Flamikin]
        team.regenerate();
        team.special();
        assert_eq!(
            drain(&mut team),
            vec!["Aquariuma", "Vineon", "Thundrake", "Flamikin"]
        );
    }

    #[test]
    fn test_back_mode() {
        let mut team = team(TeamMode::Back, &["Flamikin", "Aquariuma", "Vineon", "Thundrake"]);
        let flamikin = team.retrieve().unwrap();
        let aquariuma = team.retrieve().unwrap();
        assert_eq!(flamikin.name(), "Flamikin");
        assert_eq!(aquariuma.name(), "Aquariuma");
        team.add(aquariuma).unwrap();
        team.add(flamikin).unwrap();

        let vineon = team.retrieve().unwrap();
        let thundrake = team.retrieve().unwrap();
        let aquariuma = team.retrieve().unwrap();
        assert_eq!(vineon.name(), "Vineon");
        assert_eq!(thundrake.name(), "Thundrake");
        assert_eq!(aquariuma.name(), "Aquariuma");

        team.add(spawn("Normake")).unwrap();
        team.add(vineon).unwrap();
        team.add(aquariuma).unwrap();
        team.add(thundrake).unwrap();
        // Flamikin, Normake, Vineon, Aquariuma, Thundrake
        team.special();
        assert_eq!(
            drain(&mut team),
            vec!["Thundrake", "Aquariuma", "Vineon", "Flamikin", "Normake"]
        );

        team.add(spawn("Normake")).unwrap();
        team.regenerate();
        // Flamikin, Aquariuma, Vineon, Thundrake
        team.special();
        assert_eq!(
            drain(&mut team),
            vec!["Thundrake", "Vineon", "Flamikin", "Aquariuma"]
        );
    }

    #[test]
    fn test_back_mode_wraps_without_stale_slots() {
        let names = ["Flamikin", "Aquariuma", "Vineon", "Thundrake", "Rockodile", "Normake"];
        let mut team = team(TeamMode::Back, &names);
        assert_eq!(drain(&mut team), names.to_vec());
        team.add(spawn("Vineon")).unwrap();
        assert_eq!(team.len(), 1);
        assert_eq!(team.retrieve().unwrap().name(), "Vineon");
        assert!(matches!(team.retrieve(), Err(TeamError::Empty)));
    }

    #[test]
    fn test_optimise_mode() {
        let mut team = team(
            TeamMode::Optimise(SortKey::Hp),
            &["Flamikin", "Aquariuma", "Rockodile", "Thundrake"],
        );
        // Rockodile 9, Aquariuma 8, Flamikin 6, Thundrake 5
        let mut rockodile = team.retrieve().unwrap();
        let aquariuma = team.retrieve().unwrap();
        let mut flamikin = team.retrieve().unwrap();
        assert_eq!(rockodile.name(), "Rockodile");
        assert_eq!(aquariuma.name(), "Aquariuma");
        assert_eq!(flamikin.name(), "Flamikin");

        rockodile.set_hp(2);
        flamikin.set_hp(4);
        team.add(rockodile).unwrap();
        team.add(aquariuma).unwrap();
        team.add(flamikin).unwrap();
        // Aquariuma 8, Thundrake 5, Flamikin 4, Rockodile 2
        team.special();
        // Rockodile, Flamikin, Thundrake, Aquariuma
        let rockodile = team.retrieve().unwrap();
        let mut flamikin = team.retrieve().unwrap();
        assert_eq!(rockodile.name(), "Rockodile");
        assert_eq!(flamikin.name(), "Flamikin");

        flamikin.set_hp(1);
        team.add(flamikin).unwrap();
        team.add(rockodile).unwrap();
        assert_eq!(team.retrieve().unwrap().name(), "Flamikin");

        // Back to descending order with full HP
        team.regenerate();
        let rockodile = team.retrieve().unwrap();
        let aquariuma = team.retrieve().unwrap();
        assert_eq!(rockodile.name(), "Rockodile");
        assert_eq!(aquariuma.name(), "Aquariuma");
        assert_eq!(rockodile.hp(), 9);
        assert_eq!(aquariuma.hp(), 8);
    }

    #[test]
    fn test_optimise_ties_keep_insertion_order() {
        let mut team = team(
            TeamMode::Optimise(SortKey::Hp),
            &["Vineon", "Flamikin", "Thundrake", "Normake"],
        );
        assert_eq!(
            drain(&mut team),
            vec!["Vineon", "Flamikin", "Thundrake", "Normake"]
        );
    }

    #[test]
    fn test_capacity_exceeded() {
        let names = ["Flamikin", "Aquariuma", "Vineon", "Thundrake", "Rockodile", "Normake"];
        for mode in [TeamMode::Front, TeamMode::Back, TeamMode::Optimise(SortKey::Speed)] {
            let mut team = team(mode, &names);
            assert!(team.is_full());
            assert!(matches!(
                team.add(spawn("Flamikin")),
                Err(TeamError::CapacityExceeded { limit: TEAM_LIMIT })
            ));
            assert_eq!(team.len(), TEAM_LIMIT);
        }
    }

    #[test]
    fn test_retrieve_from_empty() {
        let mut team = team(TeamMode::Front, &[]);
        assert!(team.is_empty());
        assert!(matches!(team.retrieve(), Err(TeamError::Empty)));
    }

    #[test]
    fn test_special_on_small_teams() {
        let mut empty = team(TeamMode::Back, &[]);
        empty.special();
        assert!(empty.is_empty());

        let mut single = team(TeamMode::Back, &["Vineon"]);
        single.special();
        assert_eq!(drain(&mut single), vec!["Vineon"]);

        let mut pair = team(TeamMode::Front, &["Vineon", "Flamikin"]);
        pair.special();
        assert_eq!(drain(&mut pair), vec!["Vineon", "Flamikin"]);
    }

    #[test]
    fn test_special_twice_restores_priority_direction() {
        let mut team = team(
            TeamMode::Optimise(SortKey::Hp),
            &["Flamikin", "Aquariuma", "Rockodile"],
        );
        team.special();
        team.special();
        assert_eq!(drain(&mut team), vec!["Rockodile", "Aquariuma", "Flamikin"]);

        // Flamikin and Vineon tie on 6 HP in both directions
        let names = ["Flamikin", "Aquariuma", "Vineon", "Rockodile"];
        let mut team = self::team(TeamMode::Optimise(SortKey::Hp), &names);
        team.special();
        assert_eq!(
            drain(&mut team),
            vec!["Flamikin", "Vineon", "Aquariuma", "Rockodile"]
        );

        let mut team = self::team(TeamMode::Optimise(SortKey::Hp), &names);
        team.special();
        team.special();
        assert_eq!(
            drain(&mut team),
            vec!["Rockodile", "Aquariuma", "Flamikin", "Vineon"]
        );
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("front".parse::<TeamMode>().unwrap(), TeamMode::Front);
        assert_eq!("RING".parse::<TeamMode>().unwrap(), TeamMode::Back);
        assert_eq!(
            "optimise".parse::<TeamMode>().unwrap(),
            TeamMode::Optimise(SortKey::Hp)
        );
        assert_eq!(
            "priority:speed".parse::<TeamMode>().unwrap(),
            TeamMode::Optimise(SortKey::Speed)
        );
        assert!(matches!(
            "sideways".parse::<TeamMode>(),
            Err(TeamError::UnsupportedMode(_))
        ));
        assert!(matches!(
            "optimise:luck".parse::<TeamMode>(),
            Err(TeamError::UnsupportedMode(_))
        ));
        assert!("front:hp".parse::<TeamMode>().is_err());
    }

    #[test]
    fn test_elements_and_display() {
        let team = team(TeamMode::Front, &["Flamikin", "Aquariuma"]);
        assert_eq!(team.to_string(), "[Aquariuma, Flamikin]");
        assert_eq!(team.elements().into_iter().collect::<Vec<_>>(), vec![Element::Normal]);
        assert_eq!(team.roster().len(), 2);
    }

    fn mode_strategy() -> impl Strategy<Value = TeamMode> {
        prop_oneof![
            Just(TeamMode::Front),
            Just(TeamMode::Back),
            Just(TeamMode::Optimise(SortKey::Hp)),
            Just(TeamMode::Optimise(SortKey::Level)),
        ]
    }

    proptest! {
        #[test]
        fn prop_size_tracks_adds(mode in mode_strategy(), k in 0usize..=TEAM_LIMIT) {
            let mut team = team(mode, &[]);
            for _ in 0..k {
                team.add(spawn("Flamikin")).unwrap();
            }
            prop_assert_eq!(team.len(), k);
            if k == TEAM_LIMIT {
                prop_assert!(matches!(team.add(spawn("Vineon")), Err(TeamError::CapacityExceeded { .. })), "expected CapacityExceeded");
            }
        }

        #[test]
        fn prop_front_is_reverse_and_back_is_fifo(picks in proptest::collection::vec(0usize..6, 0..=TEAM_LIMIT)) {
            let all = ["Flamikin", "Aquariuma", "Vineon", "Thundrake", "Rockodile", "Normake"];
            let names: Vec<&str> = picks.iter().map(|&i| all[i]).collect();

            let mut front = team(TeamMode::Front, &names);
            let mut expected: Vec<String> = names.iter().map(|s| s.to_string()).collect();
            let fifo = expected.clone();
            expected.reverse();
            prop_assert_eq!(drain(&mut front), expected);

            let mut back = team(TeamMode::Back, &names);
            prop_assert_eq!(drain(&mut back), fifo);
        }

        #[test]
        fn prop_regenerate_restores_order(
            mode in mode_strategy(),
            ops in proptest::collection::vec(0u8..3, 0..20),
        ) {
            let names = ["Flamikin", "Aquariuma", "Rockodile", "Thundrake"];
            let mut reference = team(mode, &names);
            let expected = drain(&mut reference);

            let mut team = team(mode, &names);
            for op in ops {
                match op {
                    0 => { let _ = team.retrieve(); }
                    1 => { let _ = team.add(spawn("Normake")); }
                    _ => team.special(),
                }
            }
            team.regenerate();
            prop_assert_eq!(drain(&mut team), expected);
        }
    }
}
