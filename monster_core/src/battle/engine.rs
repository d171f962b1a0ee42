//! Battle engine - Turn resolution between two active monsters
//!
//! Each turn runs in a fixed order:
//! 1. Both sides choose an action; swaps and specials happen first
//! 2. Attacks resolve by speed (faster first, a tie means both attack)
//! 3. Attrition if both are still standing
//! 4. A lone survivor levels up, then any ready survivor evolves in place
//! 5. Fainted monsters are replaced from their team

use super::policy::{ActionPolicy, AlwaysAttack};
use super::report::{BattleReport, TurnSnapshot};
use super::{Action, BattleError, BattleResult};
use crate::config::BattleConstants;
use crate::element::EffectivenessTable;
use crate::monster::{Catalog, Monster};
use crate::team::{MonsterTeam, TeamError};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info};

/// Battle rules plus the action policy of each side
#[derive(Debug)]
pub struct Battle {
    table: Arc<EffectivenessTable>,
    catalog: Arc<Catalog>,
    constants: BattleConstants,
    policy1: Box<dyn ActionPolicy>,
    policy2: Box<dyn ActionPolicy>,
}

/// State of one battle in progress
#[derive(Debug)]
pub struct BattleSession<'t> {
    team1: &'t mut MonsterTeam,
    team2: &'t mut MonsterTeam,
    out1: Option<Monster>,
    out2: Option<Monster>,
    turn: u32,
    log: Vec<TurnSnapshot>,
}

impl BattleSession<'_> {
    /// Turns played so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn active1(&self) -> Option<&Monster> {
        self.out1.as_ref()
    }

    pub fn active2(&self) -> Option<&Monster> {
        self.out2.as_ref()
    }

    pub fn log(&self) -> &[TurnSnapshot] {
        &self.log
    }

    /// The result, once a side has nobody left to send out
    pub fn outcome(&self) -> Option<BattleResult> {
        match (&self.out1, &self.out2) {
            (None, None) => Some(BattleResult::Draw),
            (None, Some(_)) => Some(BattleResult::Team2),
            (Some(_), None) => Some(BattleResult::Team1),
            (Some(_), Some(_)) => None,
        }
    }
}

impl Battle {
    /// Both sides always attack, with default constants
    pub fn new(table: Arc<EffectivenessTable>, catalog: Arc<Catalog>) -> Self {
        Battle {
            table,
            catalog,
            constants: BattleConstants::default(),
            policy1: Box::new(AlwaysAttack),
            policy2: Box::new(AlwaysAttack),
        }
    }

    pub fn with_constants(mut self, constants: BattleConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn with_policies(
        mut self,
        team1: impl ActionPolicy + 'static,
        team2: impl ActionPolicy + 'static,
    ) -> Self {
        self.policy1 = Box::new(team1);
        self.policy2 = Box::new(team2);
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn table(&self) -> &Arc<EffectivenessTable> {
        &self.table
    }

    /// Send out the opening monster of each team
    pub fn start<'t>(
        &self,
        team1: &'t mut MonsterTeam,
        team2: &'t mut MonsterTeam,
    ) -> Result<BattleSession<'t>, BattleError> {
        debug!(team1 = %team1, team2 = %team2, "battle start");
        let out1 = next_out(team1)?;
        let out2 = next_out(team2)?;
        Ok(BattleSession {
            team1,
            team2,
            out1,
            out2,
            turn: 0,
            log: Vec::new(),
        })
    }

    /// Fight until one side runs out of monsters
    pub fn battle(
        &mut self,
        team1: &mut MonsterTeam,
        team2: &mut MonsterTeam,
    ) -> Result<BattleReport, BattleError> {
        let mut session = self.start(team1, team2)?;
        let result = loop {
            if let Some(result) = session.outcome() {
                break result;
            }
            self.process_turn(&mut session)?;
        };

        info!(?result, turns = session.turn, "battle finished");
        Ok(BattleReport {
            result,
            turns: session.turn,
            log: session.log,
        })
    }

    /// Play one turn. Returns the result if this turn ended the battle.
    pub fn process_turn(
        &mut self,
        session: &mut BattleSession<'_>,
    ) -> Result<Option<BattleResult>, BattleError> {
        let (mut m1, mut m2) = match (session.out1.take(), session.out2.take()) {
            (Some(m1), Some(m2)) => (m1, m2),
            (out1, out2) => {
                session.out1 = out1;
                session.out2 = out2;
                return Ok(session.outcome());
            }
        };

        session.turn += 1;
        let action1 = self.policy1.choose_action(&m1, &m2, session.team1);
        let action2 = self.policy2.choose_action(&m2, &m1, session.team2);
        session.log.push(TurnSnapshot {
            turn: session.turn,
            team1: (&m1).into(),
            team2: (&m2).into(),
            action1,
            action2,
        });
        debug!(turn = session.turn, ?action1, ?action2, team1 = %m1, team2 = %m2, "turn");

        m1 = reposition(action1, m1, session.team1)?;
        m2 = reposition(action2, m2, session.team2)?;

        match (action1, action2) {
            (Action::Attack, Action::Attack) => self.exchange(&mut m1, &mut m2),
            (Action::Attack, _) => {
                m1.attack(&mut m2, &self.table);
            }
            (_, Action::Attack) => {
                m2.attack(&mut m1, &self.table);
            }
            _ => {}
        }

        if m1.alive() && m2.alive() {
            m1.take_damage(self.constants.attrition_hp);
            m2.take_damage(self.constants.attrition_hp);
        }

        match (m1.alive(), m2.alive()) {
            (true, false) => m1.level_up(),
            (false, true) => m2.level_up(),
            _ => {}
        }

        session.out1 = self.settle(m1, session.team1)?;
        session.out2 = self.settle(m2, session.team2)?;
        Ok(session.outcome())
    }

    /// Both attack: faster first, the slower only if still standing
    fn exchange(&self, m1: &mut Monster, m2: &mut Monster) {
        match m1.speed().cmp(&m2.speed()) {
            Ordering::Greater => {
                m1.attack(m2, &self.table);
                if m2.alive() {
                    m2.attack(m1, &self.table);
                }
            }
            Ordering::Less => {
                m2.attack(m1, &self.table);
                if m1.alive() {
                    m1.attack(m2, &self.table);
                }
            }
            Ordering::Equal => {
                m1.attack(m2, &self.table);
                m2.attack(m1, &self.table);
            }
        }
    }

    /// Evolve a ready survivor, or replace a fainted monster from its team
    fn settle(&self, monster: Monster, team: &mut MonsterTeam) -> Result<Option<Monster>, BattleError> {
        if !monster.alive() {
            debug!(name = monster.name(), "fainted");
            return Ok(next_out(team)?);
        }
        if monster.ready_to_evolve() {
            return Ok(Some(monster.evolve(&self.catalog)?));
        }
        Ok(Some(monster))
    }
}

fn next_out(team: &mut MonsterTeam) -> Result<Option<Monster>, TeamError> {
    if team.is_empty() {
        Ok(None)
    } else {
        team.retrieve().map(Some)
    }
}

fn reposition(action: Action, monster: Monster, team: &mut MonsterTeam) -> Result<Monster, TeamError> {
    match action {
        Action::Attack => Ok(monster),
        Action::Swap => {
            team.add(monster)?;
            team.retrieve()
        }
        Action::Special => {
            team.add(monster)?;
            team.special();
            team.retrieve()
        }
    }
}
