//! Search configuration parameters.
//!
//! Every constant the searches and heuristics depend on lives here, so that a
//! run can be reproduced from its configuration alone. All structs
//! deserialize with defaults for missing fields.

use std::time::Duration;

use abalone_core::{AbaloneError, Result};
use serde::{Deserialize, Serialize};

use crate::tt::ReplacementPolicy;

/// How the material balance enters the static value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialTerm {
    /// `own - opponent` remaining marbles
    #[default]
    Difference,
    /// `ln(own / opponent)`, antisymmetric under a colour swap
    Ratio,
}

/// Weights of the static position evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Weight of the same-colour neighbor pair difference (cohesion)
    pub adjacency: f32,

    /// Weight of the summed distance-to-center difference (subtracted)
    pub distance: f32,

    /// Weight of the material term
    pub material: f32,

    pub material_term: MaterialTerm,

    /// Value of a won position; must dwarf any positional score
    pub win_value: f32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            adjacency: 1.0,
            distance: 1.5,
            material: 100.0,
            material_term: MaterialTerm::Difference,
            win_value: 100_000.0,
        }
    }
}

/// Weights of the cheap per-move score used for ordering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingWeights {
    /// Per extra marble moved together
    pub multiple: f32,

    /// Per opposing marble pushed off
    pub captured: f32,

    /// Per own marble pushed off
    pub lost: f32,

    /// Bonus for pushing opposing marbles
    pub attacking: f32,

    /// Score of a move that ends the game
    pub win_value: f32,
}

impl Default for OrderingWeights {
    fn default() -> Self {
        Self {
            multiple: 1.0,
            captured: 3.0,
            lost: 3.0,
            attacking: 2.0,
            win_value: 10_000.0,
        }
    }
}

/// Order in which alpha-beta visits the children of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOrdering {
    /// Move generation order
    None,
    /// The cheap per-move score
    #[default]
    MoveHeuristic,
    /// Full static value of each child position
    StaticValue,
}

/// Alpha-beta configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaBetaConfig {
    /// Search depth in plies (at least 1).
    pub max_depth: u32,

    pub ordering: MoveOrdering,

    /// Keep only the best `n` children of every node after ordering.
    /// This makes the search incomplete; `None` searches every move.
    pub breadth_limit: Option<usize>,

    /// Memoize node values in a Zobrist-keyed transposition table.
    pub transposition_table: bool,

    pub replacement: ReplacementPolicy,

    /// Seed for the Zobrist key table.
    pub zobrist_seed: u64,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            ordering: MoveOrdering::MoveHeuristic,
            breadth_limit: None,
            transposition_table: false,
            replacement: ReplacementPolicy::KeepDeepest,
            zobrist_seed: 0x5EED_AB41_0E00_0001,
        }
    }
}

impl AlphaBetaConfig {
    /// Create a config with the given depth, other values default.
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Plain alpha-beta: no ordering, no table, every move searched.
    pub fn exhaustive(max_depth: u32) -> Self {
        Self {
            max_depth,
            ordering: MoveOrdering::None,
            ..Default::default()
        }
    }

    /// Ordered search with a transposition table, truncated to the best 30
    /// moves per node.
    pub fn fast(max_depth: u32) -> Self {
        Self {
            max_depth,
            ordering: MoveOrdering::MoveHeuristic,
            breadth_limit: Some(30),
            transposition_table: true,
            ..Default::default()
        }
    }

    /// # Errors
    /// Returns `AbaloneError::InvalidConfig` for a zero depth or breadth.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(AbaloneError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.breadth_limit == Some(0) {
            return Err(AbaloneError::InvalidConfig(
                "breadth_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How MCTS grows its tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpansionPolicy {
    /// Expand every root move up front, then play out from the root
    /// children in a fixed cycle.
    RoundRobin,
    /// Expand up to `breadth` children at a time, best first by the move
    /// score, and descend by UCT.
    Uct { breadth: usize },
}

impl Default for ExpansionPolicy {
    fn default() -> Self {
        ExpansionPolicy::Uct { breadth: 20 }
    }
}

/// Which root child MCTS plays once the budget is spent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalSelection {
    /// Highest visit count (robust child)
    #[default]
    MostVisited,
    /// Highest win rate for the player to move
    BestWinRate,
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Wall-clock budget per search in milliseconds. Checked once per
    /// iteration, so a search may overrun by one playout.
    pub time_budget_ms: u64,

    /// Optional cap on iterations, for reproducible runs.
    pub max_iterations: Option<u64>,

    /// Plies after which a playout stops and is scored on material.
    pub max_plies: usize,

    /// UCT exploration constant.
    pub exploration: f32,

    pub expansion: ExpansionPolicy,

    pub final_selection: FinalSelection,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: 5_000,
            max_iterations: None,
            max_plies: 200,
            exploration: std::f32::consts::SQRT_2,
            expansion: ExpansionPolicy::default(),
            final_selection: FinalSelection::MostVisited,
        }
    }
}

impl MctsConfig {
    /// Create a config with the given time budget, other values default.
    pub fn with_time_budget(budget: Duration) -> Self {
        Self {
            time_budget_ms: budget.as_millis() as u64,
            ..Default::default()
        }
    }

    /// Create a config bounded by iterations instead of time.
    pub fn for_testing(iterations: u64) -> Self {
        Self {
            time_budget_ms: 60_000,
            max_iterations: Some(iterations),
            max_plies: 40,
            ..Default::default()
        }
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// # Errors
    /// Returns `AbaloneError::InvalidConfig` for a zero UCT breadth or a
    /// negative exploration constant.
    pub fn validate(&self) -> Result<()> {
        if let ExpansionPolicy::Uct { breadth: 0 } = self.expansion {
            return Err(AbaloneError::InvalidConfig(
                "UCT breadth must be at least 1".to_string(),
            ));
        }
        if self.exploration.is_nan() || self.exploration < 0.0 {
            return Err(AbaloneError::InvalidConfig(format!(
                "exploration constant {} must be non-negative",
                self.exploration
            )));
        }
        Ok(())
    }
}
