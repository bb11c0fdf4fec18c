//! Node-count experiment: every alpha-beta variant at a range of depths.

use abalone_board::{Abalone, Position};
use abalone_core::Game;
use abalone_search::{
    build_strategy, AbaloneEvaluator, AlphaBeta, AlphaBetaConfig, MoveOrdering, SearchStats,
};
use serde::Serialize;
use tracing::info;

/// Named alpha-beta configurations compared by the experiment.
pub fn variants(depth: u32, base: &AlphaBetaConfig) -> Vec<(&'static str, AlphaBetaConfig)> {
    let seeded = |config: AlphaBetaConfig| AlphaBetaConfig {
        zobrist_seed: base.zobrist_seed,
        replacement: base.replacement,
        ..config
    };
    vec![
        ("exhaustive", seeded(AlphaBetaConfig::exhaustive(depth))),
        ("ordered", seeded(AlphaBetaConfig::with_depth(depth))),
        (
            "static-ordered",
            seeded(AlphaBetaConfig {
                ordering: MoveOrdering::StaticValue,
                ..AlphaBetaConfig::with_depth(depth)
            }),
        ),
        (
            "ordered-table",
            seeded(AlphaBetaConfig {
                transposition_table: true,
                ..AlphaBetaConfig::with_depth(depth)
            }),
        ),
        ("fast", seeded(AlphaBetaConfig::fast(depth))),
    ]
}

#[derive(Clone, Debug, Serialize)]
pub struct NodeCount {
    pub variant: &'static str,
    pub depth: u32,
    pub nodes: u64,
    pub time_ms: f64,
    pub value: f32,
    pub best: Option<String>,
    pub stats: SearchStats,
}

/// Search `position` once per variant and depth.
pub fn run(
    game: &Abalone,
    position: &Position,
    depths: impl IntoIterator<Item = u32>,
    base: &AlphaBetaConfig,
    evaluator: &AbaloneEvaluator,
) -> Vec<NodeCount> {
    let mut rows = Vec::new();
    for depth in depths {
        for (variant, config) in variants(depth, base) {
            let mut search = AlphaBeta::new(build_strategy(&config, evaluator.clone()), depth);
            let outcome = search.search(game, position);
            info!(
                variant,
                depth,
                nodes = outcome.stats.nodes,
                side = %game.side_to_move(position),
                "searched"
            );
            rows.push(NodeCount {
                variant,
                depth,
                nodes: outcome.stats.nodes,
                time_ms: outcome.elapsed.as_secs_f64() * 1_000.0,
                value: outcome.value,
                best: outcome.best.map(|mv| mv.to_string()),
                stats: outcome.stats,
            });
        }
    }
    rows
}
