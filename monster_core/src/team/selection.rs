//! Team selection - Random, manual and provided team construction

use super::{MonsterTeam, TeamError, TeamMode, TEAM_LIMIT};
use crate::monster::{Catalog, Monster, MonsterKind};
use crate::rng::RandomGen;
use crate::stats::StatMode;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Level every selected monster starts at
const SPAWN_LEVEL: u32 = 1;

/// Which strategy built a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Random,
    Manual,
    Provided,
}

impl FromStr for SelectionMode {
    type Err = TeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(SelectionMode::Random),
            "manual" => Ok(SelectionMode::Manual),
            "provided" => Ok(SelectionMode::Provided),
            _ => Err(TeamError::UnsupportedMode(s.to_string())),
        }
    }
}

/// A selection strategy together with what it draws from
pub enum Selection<'a> {
    /// Random size, then random spawnable kinds, all from `rng`
    Random {
        catalog: &'a Catalog,
        rng: &'a mut RandomGen,
    },
    /// Size and 1-based catalog indices read from `input`
    Manual {
        catalog: &'a Catalog,
        input: &'a mut dyn SelectionInput,
    },
    /// Explicit kinds in order; `None` entries are skipped
    Provided(&'a [Option<Arc<MonsterKind>>]),
}

impl Selection<'_> {
    pub fn mode(&self) -> SelectionMode {
        match self {
            Selection::Random { .. } => SelectionMode::Random,
            Selection::Manual { .. } => SelectionMode::Manual,
            Selection::Provided(_) => SelectionMode::Provided,
        }
    }
}

/// Source of answers for manual selection
pub trait SelectionInput {
    /// Ask `question`. `Ok(None)` means the input has ended.
    fn prompt(&mut self, question: &str) -> Result<Option<String>, TeamError>;

    /// Report a rejected answer before the question is asked again
    fn reject(&mut self, _error: &TeamError) -> Result<(), TeamError> {
        Ok(())
    }
}

/// Line-oriented prompter over any reader/writer pair
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        LinePrompter { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> SelectionInput for LinePrompter<R, W> {
    fn prompt(&mut self, question: &str) -> Result<Option<String>, TeamError> {
        write!(self.writer, "{}", question)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn reject(&mut self, error: &TeamError) -> Result<(), TeamError> {
        writeln!(self.writer, "{}", error)?;
        Ok(())
    }
}

pub(super) fn select(mode: TeamMode, selection: Selection<'_>) -> Result<MonsterTeam, TeamError> {
    let selection_mode = selection.mode();
    let monsters = match selection {
        Selection::Random { catalog, rng } => random(catalog, rng)?,
        Selection::Manual { catalog, input } => manual(catalog, input)?,
        Selection::Provided(kinds) => provided(kinds)?,
    };
    debug!(?mode, ?selection_mode, size = monsters.len(), "team selected");
    MonsterTeam::from_monsters(mode, monsters)
}

fn spawn(kind: &Arc<MonsterKind>) -> Monster {
    Monster::new(Arc::clone(kind), StatMode::Simple, SPAWN_LEVEL)
}

/// Draw order: one size in `1..=TEAM_LIMIT`, then one index per slot
fn random(catalog: &Catalog, rng: &mut RandomGen) -> Result<Vec<Monster>, TeamError> {
    let spawnable: Vec<&Arc<MonsterKind>> = catalog.spawnable().collect();
    if spawnable.is_empty() {
        return Err(TeamError::NoSpawnableKinds);
    }

    let size = rng.randint(1, TEAM_LIMIT as u32) as usize;
    let mut monsters = Vec::with_capacity(size);
    for _ in 0..size {
        let index = rng.randint(0, (spawnable.len() - 1) as u32) as usize;
        let kind = spawnable.get(index).ok_or(TeamError::NoSpawnableKinds)?;
        monsters.push(spawn(kind));
    }
    Ok(monsters)
}

fn provided(kinds: &[Option<Arc<MonsterKind>>]) -> Result<Vec<Monster>, TeamError> {
    let present: Vec<&Arc<MonsterKind>> = kinds.iter().flatten().collect();
    if present.len() > TEAM_LIMIT {
        return Err(TeamError::TooManyMonsters {
            provided: present.len(),
            limit: TEAM_LIMIT,
        });
    }
    present
        .into_iter()
        .map(|kind| {
            if kind.can_be_spawned {
                Ok(spawn(kind))
            } else {
                Err(TeamError::NotSpawnable(kind.name.clone()))
            }
        })
        .collect()
}

fn manual(catalog: &Catalog, input: &mut dyn SelectionInput) -> Result<Vec<Monster>, TeamError> {
    let size = ask(input, "How many monsters are there? ", |answer| {
        parse_number(answer)
            .filter(|n| (1..=TEAM_LIMIT).contains(n))
            .ok_or_else(|| {
                TeamError::InvalidSelection(format!(
                    "team size must be between 1 and {}, got {:?}",
                    TEAM_LIMIT, answer
                ))
            })
    })?;

    let question = format!("{}Which monster are you spawning? ", listing(catalog));
    let mut monsters = Vec::with_capacity(size);
    while monsters.len() < size {
        let kind = ask(input, &question, |answer| {
            let kind = parse_number(answer)
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| catalog.all().get(idx))
                .ok_or_else(|| {
                    TeamError::InvalidSelection(format!(
                        "expected a number between 1 and {}, got {:?}",
                        catalog.len(),
                        answer
                    ))
                })?;
            if kind.can_be_spawned {
                Ok(kind)
            } else {
                Err(TeamError::InvalidSelection(format!("{} cannot be spawned", kind.name)))
            }
        })?;
        monsters.push(spawn(kind));
    }
    Ok(monsters)
}

/// Prompt until `parse` accepts an answer
fn ask<T>(
    input: &mut dyn SelectionInput,
    question: &str,
    mut parse: impl FnMut(&str) -> Result<T, TeamError>,
) -> Result<T, TeamError> {
    loop {
        let answer = input.prompt(question)?.ok_or(TeamError::InputExhausted)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(err) => {
                warn!(answer = answer.as_str(), error = %err, "selection rejected");
                input.reject(&err)?;
            }
        }
    }
}

fn parse_number(answer: &str) -> Option<usize> {
    answer.trim().parse().ok()
}

fn listing(catalog: &Catalog) -> String {
    let mut out = String::from("MONSTERS Are:\n");
    for (idx, kind) in catalog.all().iter().enumerate() {
        let mark = if kind.can_be_spawned { "✔️" } else { "❌" };
        out.push_str(&format!("{}: {} [{}]\n", idx + 1, kind.name, mark));
    }
    out
}
