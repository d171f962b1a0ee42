//! Tower Sim - Run a seeded battle tower from the command line
//!
//! Loads the bundled (or given) catalog, effectiveness table and constants,
//! builds a player team, then plays the tower to the end and prints one line
//! per round. Set `RUST_LOG=debug` to see every turn.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use monster_core::config::{self, load_catalog, load_constants, load_effectiveness};
use monster_core::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tower-sim", version, about = "Seeded monster battle tower")]
struct Cli {
    /// Seed for every random draw
    #[arg(long, default_value_t = 129_371)]
    seed: u64,

    /// Number of generated opponents
    #[arg(long, default_value_t = 3)]
    opponents: usize,

    /// Player team discipline: front, back, or optimise[:hp|attack|defense|speed|level]
    #[arg(long, default_value = "back")]
    player_mode: TeamMode,

    /// Pick the player team interactively instead of randomly
    #[arg(long)]
    manual: bool,

    /// How the player chooses actions
    #[arg(long, value_enum, default_value_t = PolicyArg::Attack)]
    policy: PolicyArg,

    /// Fight the opponents with the fewest lives first
    #[arg(long)]
    sort_opponents: bool,

    /// Monster catalog TOML (defaults to the bundled catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Effectiveness matrix TOML (defaults to the bundled matrix)
    #[arg(long)]
    effectiveness: Option<PathBuf>,

    /// Game constants TOML (defaults to the bundled constants)
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Print rounds as JSON lines
    #[arg(long)]
    json: bool,

    /// Only check whether a whitespace-separated postfix bracket is balanced
    #[arg(long)]
    bracket: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Attack,
    SpeedOrHealth,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    if let Some(bracket) = &cli.bracket {
        let tokens: Vec<&str> = bracket.split_whitespace().collect();
        let balanced = tournament_balanced(&tokens);
        println!("{}", if balanced { "balanced" } else { "unbalanced" });
        return Ok(());
    }

    let catalog = Arc::new(match &cli.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => default_catalog(),
    });
    let table = Arc::new(match &cli.effectiveness {
        Some(path) => load_effectiveness(path)
            .with_context(|| format!("Failed to load effectiveness from {}", path.display()))?,
        None => default_effectiveness(),
    });
    let constants = match &cli.constants {
        Some(path) => load_constants(path)
            .with_context(|| format!("Failed to load constants from {}", path.display()))?,
        None => config::default_constants(),
    };
    info!(
        kinds = catalog.len(),
        spawnable = catalog.spawnable_count(),
        seed = cli.seed,
        "configuration loaded"
    );

    let mut rng = RandomGen::new(cli.seed);
    let player = if cli.manual {
        let stdin = io::stdin();
        let mut prompter = LinePrompter::new(stdin.lock(), io::stdout());
        MonsterTeam::new(
            cli.player_mode,
            Selection::Manual {
                catalog: &catalog,
                input: &mut prompter,
            },
        )
    } else {
        MonsterTeam::new(
            cli.player_mode,
            Selection::Random {
                catalog: &catalog,
                rng: &mut rng,
            },
        )
    }
    .context("Failed to build player team")?;

    let battle = Battle::new(table, Arc::clone(&catalog)).with_constants(constants.battle);
    let battle = match cli.policy {
        PolicyArg::Attack => battle,
        PolicyArg::SpeedOrHealth => battle.with_policies(SpeedOrHealthPolicy, AlwaysAttack),
    };

    let mut tower = BattleTower::new(battle, rng, constants.tower);
    tower.set_my_team(player);
    tower
        .generate_teams(cli.opponents)
        .context("Failed to generate opponents")?;
    if cli.sort_opponents {
        tower.sort_by_lives();
    }

    for round in tower.by_ref() {
        let round = round.context("Tower battle failed")?;
        if cli.json {
            println!("{}", serde_json::to_string(&round)?);
        } else {
            println!(
                "Round {:>3}: {:?} | {} ({} lives) vs {} ({} lives) in {} turns",
                round.round,
                round.result,
                roster(&round.player_team),
                round.player_lives,
                roster(&round.opponent_team),
                round.opponent_lives,
                round.turns
            );
        }
    }

    info!(
        rounds = tower.rounds_played(),
        player_lives = tower.player_lives().unwrap_or(0),
        out_of_meta = ?tower.out_of_meta(),
        "tower finished"
    );
    Ok(())
}

fn roster(team: &MonsterTeam) -> String {
    let names: Vec<&str> = team.roster().iter().map(|m| m.name()).collect();
    format!("[{}]", names.join(", "))
}
