//! Depth-limited minimax with alpha-beta pruning.
//!
//! Values are always from the root side's point of view: nodes where the
//! root side moves maximize, the others minimize. The search is fail-soft, so
//! a value outside the window is still a valid bound on the true value.
//!
//! Child positions are kept in one reusable buffer per remaining depth, so
//! siblings never observe each other's states and no buffer is allocated per
//! node once the first search has warmed them up.

use std::mem;
use std::time::{Duration, Instant};

use abalone_core::{Game, Side};
use serde::Serialize;
use tracing::debug;

use crate::strategy::{prefers, Child, Scored, SearchStrategy, Window};
use crate::tt::TtStats;

/// Counters for one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes visited, leaves included
    pub nodes: u64,
    /// Nodes scored by the static evaluator
    pub leaves: u64,
    /// Loops cut short by `alpha >= beta`
    pub cutoffs: u64,
    /// Nodes answered by the strategy without expansion
    pub table_cutoffs: u64,
}

/// Result of one alpha-beta search.
#[derive(Clone, Debug)]
pub struct SearchOutcome<A> {
    pub value: f32,
    /// Best root move; `None` only when the root is a leaf
    pub best: Option<A>,
    pub stats: SearchStats,
    pub table: Option<TtStats>,
    pub elapsed: Duration,
}

/// Alpha-beta search driven by a [`SearchStrategy`].
pub struct AlphaBeta<G: Game, S> {
    strategy: S,
    max_depth: u32,
    perspective: Side,
    stats: SearchStats,
    frames: Vec<Vec<Child<G>>>,
}

impl<G: Game, S: SearchStrategy<G>> AlphaBeta<G, S> {
    /// Create a search to `max_depth` plies (raised to 1 if zero).
    pub fn new(strategy: S, max_depth: u32) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            strategy,
            max_depth,
            perspective: Side::Black,
            stats: SearchStats::default(),
            frames: (0..=max_depth).map(|_| Vec::new()).collect(),
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Counters of the last search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search `state` for the side to move.
    pub fn search(&mut self, game: &G, state: &G::State) -> SearchOutcome<G::Action> {
        let start = Instant::now();
        self.stats = SearchStats::default();
        self.perspective = game.side_to_move(state);
        self.strategy.on_search_start(game, state);

        let result = self.alphabeta(game, state, self.max_depth, Window::FULL);

        let outcome = SearchOutcome {
            value: result.value,
            best: result.action,
            stats: self.stats,
            table: self.strategy.table_stats(),
            elapsed: start.elapsed(),
        };
        debug!(
            depth = self.max_depth,
            value = outcome.value,
            nodes = outcome.stats.nodes,
            cutoffs = outcome.stats.cutoffs,
            table_cutoffs = outcome.stats.table_cutoffs,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "alpha-beta search complete"
        );
        outcome
    }

    fn alphabeta(
        &mut self,
        game: &G,
        state: &G::State,
        depth: u32,
        mut window: Window,
    ) -> Scored<G::Action> {
        self.stats.nodes += 1;

        if depth == 0 || game.is_terminal(state) {
            self.stats.leaves += 1;
            return Scored::leaf(self.strategy.evaluate(game, state, self.perspective));
        }

        if let Some(hit) = self.strategy.on_node_enter(game, state, depth, &mut window) {
            self.stats.table_cutoffs += 1;
            return hit;
        }
        let searched = window;
        let maximizing = game.side_to_move(state) == self.perspective;

        let mut children = mem::take(&mut self.frames[depth as usize]);
        children.clear();
        for action in game.legal_actions(state) {
            let child = game.apply(state, action);
            let score = self.strategy.score_child(game, state, &child, action, self.perspective);
            children.push(Child {
                action,
                state: child,
                score,
            });
        }
        assert!(
            !children.is_empty(),
            "no legal moves in a non-terminal position"
        );
        self.strategy.order_children(&mut children, maximizing);

        let mut best = Scored {
            value: if maximizing {
                f32::NEG_INFINITY
            } else {
                f32::INFINITY
            },
            action: None,
        };
        for child in &children {
            let value = self.alphabeta(game, &child.state, depth - 1, window).value;
            if best.action.is_none() || prefers(maximizing, value, best.value) {
                best = Scored {
                    value,
                    action: Some(child.action),
                };
            }
            if maximizing {
                window.alpha = window.alpha.max(value);
            } else {
                window.beta = window.beta.min(value);
            }
            if window.is_closed() {
                self.stats.cutoffs += 1;
                break;
            }
        }
        self.frames[depth as usize] = children;

        self.strategy.on_node_exit(game, state, depth, searched, best);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::AbaloneEvaluator;
    use crate::strategy::{Ordered, Simple};
    use abalone_board::{Abalone, Position};

    #[test]
    fn test_depth_one_picks_a_legal_move() {
        let game = Abalone::default();
        let pos = Position::starting();
        let mut search = AlphaBeta::new(Simple::new(AbaloneEvaluator::default()), 1);
        let outcome = search.search(&game, &pos);

        let best = outcome.best.unwrap();
        assert!(pos.legal_moves().contains(&best));
        assert!(outcome.value.abs() < 100_000.0);
        // Depth 1 never prunes: the root plus one leaf per move
        assert_eq!(outcome.stats.nodes, 45);
        assert_eq!(outcome.stats.leaves, 44);
        assert!(outcome.table.is_none());
    }

    #[test]
    fn test_stats_reset_between_searches() {
        let game = Abalone::default();
        let pos = Position::starting();
        let eval = AbaloneEvaluator::default();
        let mut search = AlphaBeta::new(Ordered::new(Simple::new(eval.clone()), eval), 2);
        let first = search.search(&game, &pos);
        let second = search.search(&game, &pos);
        assert_eq!(first.stats, second.stats);
        assert_eq!(first.best, second.best);
        assert_eq!(search.stats(), second.stats);
    }

    #[test]
    fn test_zero_depth_raised_to_one() {
        let search: AlphaBeta<Abalone, _> =
            AlphaBeta::new(Simple::new(AbaloneEvaluator::default()), 0);
        assert_eq!(search.max_depth(), 1);
    }

    #[test]
    fn test_terminal_root_has_no_move() {
        let rows = [
            "WWWWW", "WWW...", ".......", "........", ".........", "........", ".......",
            "BBBBBB", "BBBBB",
        ];
        let pos = Position::from_rows(&rows, Side::White).unwrap();
        let game = Abalone::default();
        let mut search = AlphaBeta::new(Simple::new(AbaloneEvaluator::default()), 2);
        let outcome = search.search(&game, &pos);
        assert_eq!(outcome.best, None);
        // White to move has already lost
        assert_eq!(outcome.value, -100_000.0);
    }
}
