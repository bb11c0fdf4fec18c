//! Search agents: one search behind a "given a position, pick a move" call.
//!
//! Every agent checks the position first, runs its search with fresh
//! counters and reports the move with the numbers a game runner records.

use std::time::{Duration, Instant};

use abalone_board::Abalone;
use abalone_core::hex::CELL_COUNT;
use abalone_core::{AbaloneError, Game, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::alphabeta::AlphaBeta;
use crate::config::{AlphaBetaConfig, MctsConfig, MoveOrdering};
use crate::evaluator::{AbaloneEvaluator, MoveScorer, StaticValueScorer};
use crate::mcts::MonteCarlo;
use crate::strategy::{BreadthLimited, Ordered, SearchStrategy, Simple, TableBacked};
use crate::tt::{TranspositionTable, ZobristKeys};

/// A move chosen by an agent.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision<A> {
    pub action: A,
    /// Value the search attached to the move, if it computes one
    pub score: Option<f32>,
    /// Nodes visited (alpha-beta) or tree nodes created (MCTS)
    pub nodes: u64,
    pub elapsed: Duration,
}

/// A player that picks one move per call.
pub trait Agent<G: Game> {
    fn name(&self) -> String;

    /// Choose a move for the side to move in `state`.
    ///
    /// `history` holds the moves played so far, oldest first.
    ///
    /// # Errors
    /// Returns `AbaloneError::GameOver` if the game has ended and
    /// `AbaloneError::NoLegalMoves` if the side to move cannot move.
    fn decide(
        &mut self,
        game: &G,
        state: &G::State,
        history: &[G::Action],
    ) -> Result<Decision<G::Action>>;
}

impl<G: Game, T: Agent<G> + ?Sized> Agent<G> for Box<T> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn decide(
        &mut self,
        game: &G,
        state: &G::State,
        history: &[G::Action],
    ) -> Result<Decision<G::Action>> {
        (**self).decide(game, state, history)
    }
}

/// Legal moves of a position that is still being played.
fn playable_moves<G: Game>(game: &G, state: &G::State) -> Result<Vec<G::Action>> {
    if game.is_terminal(state) {
        return Err(AbaloneError::GameOver);
    }
    let actions = game.legal_actions(state);
    if actions.is_empty() {
        return Err(AbaloneError::NoLegalMoves);
    }
    Ok(actions)
}

/// Alpha-beta to a fixed depth.
pub struct AlphaBetaAgent<G: Game, S> {
    name: String,
    search: AlphaBeta<G, S>,
}

impl<G: Game, S: SearchStrategy<G>> AlphaBetaAgent<G, S> {
    pub fn new(name: impl Into<String>, strategy: S, depth: u32) -> Self {
        Self {
            name: name.into(),
            search: AlphaBeta::new(strategy, depth),
        }
    }

    pub fn search(&self) -> &AlphaBeta<G, S> {
        &self.search
    }
}

impl<G: Game, S: SearchStrategy<G>> Agent<G> for AlphaBetaAgent<G, S> {
    fn name(&self) -> String {
        format!("{} depth {}", self.name, self.search.max_depth())
    }

    fn decide(
        &mut self,
        game: &G,
        state: &G::State,
        history: &[G::Action],
    ) -> Result<Decision<G::Action>> {
        let actions = playable_moves(game, state)?;
        let outcome = self.search.search(game, state);
        let action = outcome
            .best
            .or_else(|| actions.first().copied())
            .ok_or(AbaloneError::NoLegalMoves)?;

        debug!(
            agent = %self.name,
            ply = history.len(),
            action = ?action,
            value = outcome.value,
            nodes = outcome.stats.nodes,
            "decided"
        );
        if let Some(table) = outcome.table {
            debug!(
                probes = table.probes,
                hits = table.hits,
                stores = table.stores,
                "transposition table"
            );
        }

        Ok(Decision {
            action,
            score: Some(outcome.value),
            nodes: outcome.stats.nodes,
            elapsed: outcome.elapsed,
        })
    }
}

/// Monte Carlo tree search within a time budget.
pub struct MonteCarloAgent<G: Game, M, R> {
    name: String,
    search: MonteCarlo<G, M, R>,
}

impl<G: Game, M: MoveScorer<G>, R: Rng> MonteCarloAgent<G, M, R> {
    pub fn new(name: impl Into<String>, search: MonteCarlo<G, M, R>) -> Self {
        Self {
            name: name.into(),
            search,
        }
    }
}

impl<G: Game, M: MoveScorer<G>, R: Rng> Agent<G> for MonteCarloAgent<G, M, R> {
    fn name(&self) -> String {
        format!(
            "{} budget {}ms",
            self.name,
            self.search.config().time_budget_ms
        )
    }

    fn decide(
        &mut self,
        game: &G,
        state: &G::State,
        history: &[G::Action],
    ) -> Result<Decision<G::Action>> {
        playable_moves(game, state)?;
        let result = self
            .search
            .search(game, state)
            .ok_or(AbaloneError::NoLegalMoves)?;

        debug!(
            agent = %self.name,
            ply = history.len(),
            action = ?result.best_action,
            iterations = result.iterations,
            win_rate = result.win_rate,
            "decided"
        );

        Ok(Decision {
            action: result.best_action,
            score: Some(result.win_rate),
            nodes: result.tree_size as u64,
            elapsed: result.elapsed,
        })
    }
}

/// Uniformly random legal moves.
pub struct RandomAgent<R> {
    rng: R,
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<G: Game, R: Rng> Agent<G> for RandomAgent<R> {
    fn name(&self) -> String {
        "random".to_string()
    }

    fn decide(
        &mut self,
        game: &G,
        state: &G::State,
        _history: &[G::Action],
    ) -> Result<Decision<G::Action>> {
        let start = Instant::now();
        let actions = playable_moves(game, state)?;
        let action = *actions
            .choose(&mut self.rng)
            .ok_or(AbaloneError::NoLegalMoves)?;
        Ok(Decision {
            action,
            score: None,
            nodes: 0,
            elapsed: start.elapsed(),
        })
    }
}

/// Alpha-beta strategy for Abalone, composed from `config`.
pub type AbaloneStrategy = Box<dyn SearchStrategy<Abalone> + Send>;

/// Compose the strategy `config` describes: the evaluator, then ordering,
/// then the breadth limit, then the transposition table outermost.
pub fn build_strategy(config: &AlphaBetaConfig, evaluator: AbaloneEvaluator) -> AbaloneStrategy {
    let simple = Simple::new(evaluator.clone());
    let mut strategy: AbaloneStrategy = match config.ordering {
        MoveOrdering::None => Box::new(simple),
        MoveOrdering::MoveHeuristic => Box::new(Ordered::new(simple, evaluator)),
        MoveOrdering::StaticValue => {
            Box::new(Ordered::new(simple, StaticValueScorer(evaluator)))
        }
    };
    if let Some(limit) = config.breadth_limit {
        strategy = Box::new(BreadthLimited::new(strategy, limit));
    }
    if config.transposition_table {
        strategy = Box::new(TableBacked::<Abalone, _>::new(
            strategy,
            ZobristKeys::new(CELL_COUNT, config.zobrist_seed),
            TranspositionTable::new(config.replacement),
        ));
    }
    strategy
}

/// Alpha-beta agent for Abalone.
///
/// # Errors
/// Returns `AbaloneError::InvalidConfig` if `config` does not validate.
pub fn alphabeta_agent(
    name: impl Into<String>,
    config: &AlphaBetaConfig,
    evaluator: AbaloneEvaluator,
) -> Result<AlphaBetaAgent<Abalone, AbaloneStrategy>> {
    config.validate()?;
    let name = name.into();
    info!(agent = %name, ?config, "building alpha-beta agent");
    Ok(AlphaBetaAgent::new(
        name,
        build_strategy(config, evaluator),
        config.max_depth,
    ))
}

/// Monte Carlo agent for Abalone, ordering UCT expansions by the
/// evaluator's move score.
///
/// # Errors
/// Returns `AbaloneError::InvalidConfig` if `config` does not validate.
pub fn monte_carlo_agent<R: Rng>(
    name: impl Into<String>,
    config: MctsConfig,
    evaluator: AbaloneEvaluator,
    rng: R,
) -> Result<MonteCarloAgent<Abalone, AbaloneEvaluator, R>> {
    config.validate()?;
    let name = name.into();
    info!(agent = %name, ?config, "building monte carlo agent");
    Ok(MonteCarloAgent::new(
        name,
        MonteCarlo::new(config, evaluator, rng),
    ))
}
