//! Game runner: alternates two agents and records every move.

use std::time::{Duration, Instant};

use abalone_board::{format_move, Abalone, Move};
use abalone_core::{AbaloneError, Game, Score, Side};
use abalone_search::{
    alphabeta_agent, monte_carlo_agent, Agent, AlphaBetaConfig, ExpansionPolicy, RandomAgent,
};
use anyhow::{Context, Result};
use clap::ValueEnum;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ArenaConfig;

/// Agents the arena can seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    /// Alpha-beta as configured in `[alphabeta]`
    Alphabeta,
    /// Ordered alpha-beta with a transposition table, top 30 moves per node
    AlphabetaFast,
    /// MCTS as configured in `[mcts]`
    Mcts,
    /// MCTS cycling over every root move
    MctsRoundRobin,
    /// Uniformly random legal moves
    Random,
}

pub type ArenaAgent = Box<dyn Agent<Abalone> + Send>;

/// Build an agent of `kind`. `seed` drives any randomness it uses.
pub fn build_agent(kind: AgentKind, config: &ArenaConfig, seed: u64) -> Result<ArenaAgent> {
    let evaluator = config.evaluator();
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let agent: ArenaAgent = match kind {
        AgentKind::Alphabeta => Box::new(alphabeta_agent("alphabeta", &config.alphabeta, evaluator)?),
        AgentKind::AlphabetaFast => {
            let fast = AlphaBetaConfig {
                zobrist_seed: config.alphabeta.zobrist_seed,
                ..AlphaBetaConfig::fast(config.alphabeta.max_depth)
            };
            Box::new(alphabeta_agent("alphabeta-fast", &fast, evaluator)?)
        }
        AgentKind::Mcts => Box::new(monte_carlo_agent("mcts", config.mcts.clone(), evaluator, rng)?),
        AgentKind::MctsRoundRobin => {
            let mut mcts = config.mcts.clone();
            mcts.expansion = ExpansionPolicy::RoundRobin;
            Box::new(monte_carlo_agent("mcts-round-robin", mcts, evaluator, rng)?)
        }
        AgentKind::Random => Box::new(RandomAgent::new(rng)),
    };
    Ok(agent)
}

/// One move of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based move number
    pub number: usize,
    pub side: Side,
    /// The move as `format_move` prints it
    pub notation: String,
    /// Deliberation time in milliseconds
    pub time_ms: f64,
    /// Search value attached to the move, if the agent computes one
    pub score: Option<f32>,
    pub nodes: u64,
}

/// A finished (or capped) game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub black: String,
    pub white: String,
    pub moves: Vec<MoveRecord>,
    pub final_score: Score,
    pub total_ms: f64,
    /// `None` when the turn cap ended the game
    pub winner: Option<Side>,
}

impl GameRecord {
    /// Total deliberation time of `side`.
    pub fn time_of(&self, side: Side) -> f64 {
        self.moves
            .iter()
            .filter(|m| m.side == side)
            .map(|m| m.time_ms)
            .sum()
    }

    pub fn moves_of(&self, side: Side) -> usize {
        self.moves.iter().filter(|m| m.side == side).count()
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

/// Play one game from the initial position of `game`, Black moving first,
/// until it ends or `turn_cap` moves have been played.
pub fn play_game(
    game: &Abalone,
    black: &mut dyn Agent<Abalone>,
    white: &mut dyn Agent<Abalone>,
    turn_cap: usize,
    seed: u64,
) -> Result<GameRecord> {
    let start = Instant::now();
    let mut state = game.initial_state();
    let mut history: Vec<Move> = Vec::new();
    let mut moves = Vec::new();

    while !game.is_terminal(&state) && moves.len() < turn_cap {
        let side = game.side_to_move(&state);
        let agent: &mut dyn Agent<Abalone> = match side {
            Side::Black => &mut *black,
            Side::White => &mut *white,
        };

        let decision = match agent.decide(game, &state, &history) {
            Ok(decision) => decision,
            Err(AbaloneError::NoLegalMoves) => {
                warn!(%side, ply = history.len(), "no legal moves, ending game");
                break;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("{} failed to move", agent.name()));
            }
        };

        let number = moves.len() + 1;
        let notation = format_move(number, side, decision.action);
        debug!(%notation, nodes = decision.nodes, "move");
        moves.push(MoveRecord {
            number,
            side,
            notation,
            time_ms: millis(decision.elapsed),
            score: decision.score,
            nodes: decision.nodes,
        });

        history.push(decision.action);
        state = game.apply(&state, decision.action);
    }

    let record = GameRecord {
        seed,
        black: black.name(),
        white: white.name(),
        moves,
        final_score: game.score(&state),
        total_ms: millis(start.elapsed()),
        winner: game.winner(&state),
    };
    info!(
        seed,
        moves = record.moves.len(),
        score = %record.final_score,
        winner = ?record.winner,
        "game finished"
    );
    Ok(record)
}
