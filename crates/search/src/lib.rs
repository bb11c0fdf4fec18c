//! Game-tree search for Abalone.
//!
//! This crate provides depth-limited alpha-beta search and Monte Carlo tree
//! search over any game implementing `abalone_core::Game`, plus the Abalone
//! evaluator and the agents a game runner drives.
//!
//! # Features
//!
//! - **Composable alpha-beta**: evaluation, move ordering, breadth limits and
//!   a transposition table are layered strategies, not subclasses
//! - **Zobrist transposition table** with a configurable replacement policy
//! - **MCTS** with round-robin or UCT-guided expansion and random playouts
//! - **Deterministic**: all randomness comes from a caller-supplied RNG
//!
//! # Example
//!
//! ```
//! use abalone_board::{Abalone, Position};
//! use abalone_search::{alphabeta_agent, Agent, AbaloneEvaluator, AlphaBetaConfig};
//!
//! let game = Abalone::default();
//! let position = Position::starting();
//!
//! let config = AlphaBetaConfig::with_depth(2);
//! let mut agent = alphabeta_agent("alphabeta", &config, AbaloneEvaluator::default())
//!     .expect("valid config");
//!
//! let decision = agent.decide(&game, &position, &[]).expect("game in progress");
//! println!("{} after {} nodes", decision.action, decision.nodes);
//! ```

pub mod agent;
pub mod alphabeta;
pub mod config;
pub mod evaluator;
pub mod mcts;
mod node;
pub mod strategy;
mod tree;
pub mod tt;

pub use agent::{
    alphabeta_agent, build_strategy, monte_carlo_agent, AbaloneStrategy, Agent, AlphaBetaAgent,
    Decision, MonteCarloAgent, RandomAgent,
};
pub use alphabeta::{AlphaBeta, SearchOutcome, SearchStats};
pub use config::{
    AlphaBetaConfig, ExpansionPolicy, FinalSelection, HeuristicWeights, MaterialTerm,
    MctsConfig, MoveOrdering, OrderingWeights,
};
pub use evaluator::{
    AbaloneEvaluator, MoveScorer, PositionFeatures, StaticEvaluator, StaticValueScorer,
};
pub use mcts::{MctsResult, MonteCarlo};
pub use node::{NodeId, NodeStats};
pub use strategy::{
    sort_children, BreadthLimited, Child, Ordered, Scored, SearchStrategy, Simple, TableBacked,
    Window,
};
pub use tt::{Bound, ReplacementPolicy, TranspositionTable, TtEntry, TtStats, ZobristKeys};
