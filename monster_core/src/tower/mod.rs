//! BattleTower - Elimination ladder against generated opponents
//!
//! The player's team fights a circular queue of opponent teams. Every team
//! has a life counter; a loss costs one life, a draw costs both sides one.
//! Opponents with lives left rejoin the back of the queue. All randomness
//! (player lives, opponent rosters, opponent lives) comes from one stream in
//! a fixed order, so a seed replays the whole ladder.

mod tournament;

pub use tournament::{tournament_balanced, JOINER};

use crate::battle::{Battle, BattleError, BattleResult};
use crate::config::TowerConstants;
use crate::element::Element;
use crate::rng::RandomGen;
use crate::team::{MonsterTeam, Selection, TeamError};
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum TowerError {
    #[error("no battles remaining")]
    NoBattlesRemaining,
    #[error("no player team has been set")]
    NoPlayerTeam,
    #[error(transparent)]
    Team(#[from] TeamError),
    #[error(transparent)]
    Battle(#[from] BattleError),
}

/// Outcome of one tower battle
#[derive(Debug, Clone, Serialize)]
pub struct TowerRound {
    /// 1-based
    pub round: u32,
    pub result: BattleResult,
    #[serde(serialize_with = "roster_names")]
    pub player_team: MonsterTeam,
    #[serde(serialize_with = "roster_names")]
    pub opponent_team: MonsterTeam,
    pub player_lives: u32,
    pub opponent_lives: u32,
    pub turns: u32,
}

fn roster_names<S: Serializer>(team: &MonsterTeam, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(team.roster().iter().map(|m| m.name()))
}

#[derive(Debug)]
struct Contender {
    team: MonsterTeam,
    lives: u32,
}

#[derive(Debug)]
pub struct BattleTower {
    battle: Battle,
    rng: RandomGen,
    constants: TowerConstants,
    player: Option<Contender>,
    opponents: VecDeque<Contender>,
    /// Elements fielded in any completed battle
    seen: BTreeSet<Element>,
    rounds: u32,
}

impl BattleTower {
    pub fn new(battle: Battle, rng: RandomGen, constants: TowerConstants) -> Self {
        BattleTower {
            battle,
            rng,
            constants,
            player: None,
            opponents: VecDeque::new(),
            seen: BTreeSet::new(),
            rounds: 0,
        }
    }

    fn draw_lives(&mut self) -> u32 {
        self.rng.randint(self.constants.min_lives, self.constants.max_lives)
    }

    /// Bind the player's team and draw its lives
    pub fn set_my_team(&mut self, team: MonsterTeam) {
        let lives = self.draw_lives();
        debug!(team = %team, lives, "player team set");
        self.player = Some(Contender { team, lives });
    }

    /// Generate `n` opponents. Each team is drawn before its lives.
    pub fn generate_teams(&mut self, n: usize) -> Result<(), TowerError> {
        let catalog = Arc::clone(self.battle.catalog());
        for _ in 0..n {
            let team = MonsterTeam::new(
                self.constants.opponent_mode,
                Selection::Random {
                    catalog: &catalog,
                    rng: &mut self.rng,
                },
            )?;
            let lives = self.draw_lives();
            self.add_opponent(team, lives);
        }
        Ok(())
    }

    /// Queue an opponent with a fixed number of lives
    pub fn add_opponent(&mut self, team: MonsterTeam, lives: u32) {
        debug!(team = %team, lives, "opponent queued");
        self.opponents.push_back(Contender { team, lives });
    }

    /// The player still has lives and someone is left to fight
    pub fn battles_remaining(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.lives > 0) && !self.opponents.is_empty()
    }

    /// Fight the opponent at the front of the queue
    pub fn next_battle(&mut self) -> Result<TowerRound, TowerError> {
        let player = self.player.as_mut().ok_or(TowerError::NoPlayerTeam)?;
        if player.lives == 0 {
            return Err(TowerError::NoBattlesRemaining);
        }
        let mut opponent = self
            .opponents
            .pop_front()
            .ok_or(TowerError::NoBattlesRemaining)?;

        player.team.regenerate();
        opponent.team.regenerate();
        let report = match self.battle.battle(&mut player.team, &mut opponent.team) {
            Ok(report) => report,
            Err(err) => {
                self.opponents.push_front(opponent);
                return Err(err.into());
            }
        };

        match report.result {
            BattleResult::Team1 => opponent.lives = opponent.lives.saturating_sub(1),
            BattleResult::Team2 => player.lives = player.lives.saturating_sub(1),
            BattleResult::Draw => {
                opponent.lives = opponent.lives.saturating_sub(1);
                player.lives = player.lives.saturating_sub(1);
            }
        }

        self.seen.extend(player.team.elements());
        self.seen.extend(opponent.team.elements());

        self.rounds += 1;
        let round = TowerRound {
            round: self.rounds,
            result: report.result,
            player_team: player.team.clone(),
            opponent_team: opponent.team.clone(),
            player_lives: player.lives,
            opponent_lives: opponent.lives,
            turns: report.turns,
        };
        info!(
            round = round.round,
            result = ?round.result,
            player_lives = round.player_lives,
            opponent_lives = round.opponent_lives,
            "tower round"
        );

        if opponent.lives > 0 {
            self.opponents.push_back(opponent);
        } else {
            debug!(team = %opponent.team, "opponent eliminated");
        }
        Ok(round)
    }

    /// Elements fielded in some completed battle that neither side of the
    /// upcoming pairing fields, in element order
    pub fn out_of_meta(&self) -> Vec<Element> {
        let mut upcoming = BTreeSet::new();
        if let Some(player) = &self.player {
            upcoming.extend(player.team.elements());
        }
        if let Some(next) = self.opponents.front() {
            upcoming.extend(next.team.elements());
        }
        self.seen.difference(&upcoming).copied().collect()
    }

    /// Stable reorder of pending opponents, fewest lives first
    pub fn sort_by_lives(&mut self) {
        self.opponents.make_contiguous().sort_by_key(|c| c.lives);
    }

    pub fn player_lives(&self) -> Option<u32> {
        self.player.as_ref().map(|p| p.lives)
    }

    /// Lives of pending opponents in queue order
    pub fn opponent_lives(&self) -> Vec<u32> {
        self.opponents.iter().map(|c| c.lives).collect()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds
    }
}

impl Iterator for BattleTower {
    type Item = Result<TowerRound, TowerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.battles_remaining() {
            Some(self.next_battle())
        } else {
            None
        }
    }
}
