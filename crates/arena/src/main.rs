//! Abalone arena: plays search agents against each other and runs
//! node-count experiments.
//!
//! Game records, summaries and experiment rows go to stdout as JSON lines;
//! logs go to stderr.

mod config;
mod experiment;
mod runner;
mod stats;

use std::io::{self, Write};
use std::path::PathBuf;

use abalone_board::{Abalone, Layout, Position};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::config::ArenaConfig;
use crate::runner::{build_agent, play_game, AgentKind, GameRecord};

/// Abalone search arena.
#[derive(Parser)]
#[command(name = "abalone-arena")]
#[command(about = "Play Abalone agents against each other and compare searches")]
struct Cli {
    /// TOML file with [alphabeta], [mcts], [weights] and [ordering] sections.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games between two agents.
    Play {
        /// Agent playing Black (moves first).
        #[arg(long, value_enum, default_value = "alphabeta")]
        black: AgentKind,

        /// Agent playing White.
        #[arg(long, value_enum, default_value = "random")]
        white: AgentKind,

        /// Number of games to play.
        #[arg(short, long, default_value = "1")]
        games: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Alpha-beta search depth (overrides the config file).
        #[arg(short, long)]
        depth: Option<u32>,

        /// MCTS time budget per move in milliseconds (overrides the config file).
        #[arg(short, long)]
        time_budget_ms: Option<u64>,

        /// MCTS iteration cap per move (overrides the config file).
        #[arg(long)]
        max_iterations: Option<u64>,

        /// Stop a game after this many moves.
        #[arg(long, default_value = "200")]
        turn_cap: usize,

        /// Print only the summary, not every game record.
        #[arg(long)]
        summary_only: bool,
    },

    /// Count nodes visited by each alpha-beta variant.
    Nodes {
        /// Deepest search to run; every depth from 1 up is searched.
        #[arg(short, long, default_value = "3")]
        depth: u32,

        #[arg(long, value_enum, default_value = "standard")]
        layout: LayoutArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Standard,
    GermanDaisy,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Standard => Layout::Standard,
            LayoutArg::GermanDaisy => Layout::GermanDaisy,
        }
    }
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {}", level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("Failed to serialize record")?;
    writeln!(out)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_play(
    mut config: ArenaConfig,
    black: AgentKind,
    white: AgentKind,
    games: usize,
    seed: u64,
    depth: Option<u32>,
    time_budget_ms: Option<u64>,
    max_iterations: Option<u64>,
    turn_cap: usize,
    summary_only: bool,
) -> Result<()> {
    if games == 0 {
        bail!("--games must be at least 1");
    }
    if let Some(depth) = depth {
        config.alphabeta.max_depth = depth;
    }
    if let Some(budget) = time_budget_ms {
        config.mcts.time_budget_ms = budget;
    }
    if max_iterations.is_some() {
        config.mcts.max_iterations = max_iterations;
    }
    config.validate()?;

    info!(?black, ?white, games, seed, "starting face-off");
    let game = Abalone::default();

    // Each game owns its agents; searches stay single-threaded
    let records: Vec<GameRecord> = (0..games)
        .into_par_iter()
        .map(|i| {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            let mut black_agent = build_agent(black, &config, game_seed)?;
            let mut white_agent = build_agent(white, &config, game_seed.wrapping_add(1))?;
            play_game(
                &game,
                black_agent.as_mut(),
                white_agent.as_mut(),
                turn_cap,
                game_seed,
            )
            .with_context(|| format!("Game {} failed", i))
        })
        .collect::<Result<_>>()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !summary_only {
        for record in &records {
            print_json(&mut out, record)?;
        }
    }
    if let Some(summary) = stats::summarize(&records) {
        print_json(&mut out, &summary)?;
    }
    Ok(())
}

fn cmd_nodes(config: ArenaConfig, depth: u32, layout: LayoutArg) -> Result<()> {
    if depth == 0 {
        bail!("--depth must be at least 1");
    }
    let game = Abalone::new(layout.into());
    let position = Position::from_layout(layout.into());
    let rows = experiment::run(
        &game,
        &position,
        1..=depth,
        &config.alphabeta,
        &config.evaluator(),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in &rows {
        print_json(&mut out, row)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = match &cli.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };

    match cli.command {
        Commands::Play {
            black,
            white,
            games,
            seed,
            depth,
            time_budget_ms,
            max_iterations,
            turn_cap,
            summary_only,
        } => cmd_play(
            config,
            black,
            white,
            games,
            seed,
            depth,
            time_budget_ms,
            max_iterations,
            turn_cap,
            summary_only,
        ),

        Commands::Nodes { depth, layout } => cmd_nodes(config, depth, layout),
    }
}
