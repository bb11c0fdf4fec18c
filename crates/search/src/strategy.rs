//! Composable alpha-beta strategies.
//!
//! The search loop in [`crate::alphabeta`] is fixed; everything that varies
//! between search variants goes through [`SearchStrategy`]. Variants are built
//! by wrapping: `Simple` evaluates leaves, `Ordered` scores and sorts
//! children, `BreadthLimited` truncates the sorted list and `TableBacked`
//! adds transposition-table probes and stores around every node.

use std::cmp::Ordering;

use abalone_core::{Game, Side};

use crate::evaluator::{MoveScorer, StaticEvaluator};
use crate::tt::{Bound, TranspositionTable, TtEntry, TtStats, ZobristKeys};

/// Alpha-beta window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub alpha: f32,
    pub beta: f32,
}

impl Window {
    /// The unbounded window used at the root.
    pub const FULL: Window = Window {
        alpha: f32::NEG_INFINITY,
        beta: f32::INFINITY,
    };

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.alpha >= self.beta
    }
}

/// A node value together with the move that achieves it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scored<A> {
    pub value: f32,
    /// `None` at leaves
    pub action: Option<A>,
}

impl<A> Scored<A> {
    pub fn leaf(value: f32) -> Self {
        Self {
            value,
            action: None,
        }
    }
}

/// An expanded child: the move, the position it leads to and its ordering
/// score.
pub struct Child<G: Game> {
    pub action: G::Action,
    pub state: G::State,
    pub score: f32,
}

/// The capability set an alpha-beta variant is made of.
///
/// All values are from the point of view of the root side (`perspective`).
/// Hooks default to doing nothing.
pub trait SearchStrategy<G: Game> {
    /// Leaf value of `state`.
    fn evaluate(&mut self, game: &G, state: &G::State, perspective: Side) -> f32;

    /// Ordering score of a child.
    fn score_child(
        &mut self,
        _game: &G,
        _parent: &G::State,
        _child: &G::State,
        _action: G::Action,
        _perspective: Side,
    ) -> f32 {
        0.0
    }

    /// Reorder (and possibly truncate) the children of a node. Must leave at
    /// least one child.
    fn order_children(&mut self, _children: &mut Vec<Child<G>>, _maximizing: bool) {}

    /// Called once before each search.
    fn on_search_start(&mut self, _game: &G, _root: &G::State) {}

    /// Called before a node at `depth` is expanded. May tighten `window`, or
    /// return a value to use without expanding the node.
    fn on_node_enter(
        &mut self,
        _game: &G,
        _state: &G::State,
        _depth: u32,
        _window: &mut Window,
    ) -> Option<Scored<G::Action>> {
        None
    }

    /// Called with the value of an expanded node and the window it was
    /// searched with.
    fn on_node_exit(
        &mut self,
        _game: &G,
        _state: &G::State,
        _depth: u32,
        _searched: Window,
        _result: Scored<G::Action>,
    ) {
    }

    /// Transposition table counters, if the strategy has a table.
    fn table_stats(&self) -> Option<TtStats> {
        None
    }
}

impl<G: Game, S: SearchStrategy<G> + ?Sized> SearchStrategy<G> for Box<S> {
    fn evaluate(&mut self, game: &G, state: &G::State, perspective: Side) -> f32 {
        (**self).evaluate(game, state, perspective)
    }

    fn score_child(
        &mut self,
        game: &G,
        parent: &G::State,
        child: &G::State,
        action: G::Action,
        perspective: Side,
    ) -> f32 {
        (**self).score_child(game, parent, child, action, perspective)
    }

    fn order_children(&mut self, children: &mut Vec<Child<G>>, maximizing: bool) {
        (**self).order_children(children, maximizing)
    }

    fn on_search_start(&mut self, game: &G, root: &G::State) {
        (**self).on_search_start(game, root)
    }

    fn on_node_enter(
        &mut self,
        game: &G,
        state: &G::State,
        depth: u32,
        window: &mut Window,
    ) -> Option<Scored<G::Action>> {
        (**self).on_node_enter(game, state, depth, window)
    }

    fn on_node_exit(
        &mut self,
        game: &G,
        state: &G::State,
        depth: u32,
        searched: Window,
        result: Scored<G::Action>,
    ) {
        (**self).on_node_exit(game, state, depth, searched, result)
    }

    fn table_stats(&self) -> Option<TtStats> {
        (**self).table_stats()
    }
}

/// Static evaluation only; children are searched in generation order.
#[derive(Clone, Debug)]
pub struct Simple<E> {
    evaluator: E,
}

impl<E> Simple<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

impl<G: Game, E: StaticEvaluator<G>> SearchStrategy<G> for Simple<E> {
    fn evaluate(&mut self, game: &G, state: &G::State, perspective: Side) -> f32 {
        self.evaluator.evaluate(game, state, perspective)
    }
}

/// Sorts children by a move score: best for the side to move first.
///
/// The sort is stable, so equal scores keep generation order.
#[derive(Clone, Debug)]
pub struct Ordered<S, M> {
    inner: S,
    scorer: M,
}

impl<S, M> Ordered<S, M> {
    pub fn new(inner: S, scorer: M) -> Self {
        Self { inner, scorer }
    }
}

/// Stable sort of `children`, descending by score when `maximizing`.
pub fn sort_children<G: Game>(children: &mut [Child<G>], maximizing: bool) {
    children.sort_by(|a, b| {
        let ord = a.score.total_cmp(&b.score);
        if maximizing {
            ord.reverse()
        } else {
            ord
        }
    });
}

impl<G: Game, S: SearchStrategy<G>, M: MoveScorer<G>> SearchStrategy<G> for Ordered<S, M> {
    fn evaluate(&mut self, game: &G, state: &G::State, perspective: Side) -> f32 {
        self.inner.evaluate(game, state, perspective)
    }

    fn score_child(
        &mut self,
        game: &G,
        parent: &G::State,
        child: &G::State,
        action: G::Action,
        perspective: Side,
    ) -> f32 {
        self.scorer.score_move(game, parent, child, action, perspective)
    }

    fn order_children(&mut self, children: &mut Vec<Child<G>>, maximizing: bool) {
        self.inner.order_children(children, maximizing);
        sort_children(children, maximizing);
    }

    fn on_search_start(&mut self, game: &G, root: &G::State) {
        self.inner.on_search_start(game, root)
    }

    fn on_node_enter(
        &mut self,
        game: &G,
        state: &G::State,
        depth: u32,
        window: &mut Window,
    ) -> Option<Scored<G::Action>> {
        self.inner.on_node_enter(game, state, depth, window)
    }

    fn on_node_exit(
        &mut self,
        game: &G,
        state: &G::State,
        depth: u32,
        searched: Window,
        result: Scored<G::Action>,
    ) {
        self.inner.on_node_exit(game, state, depth, searched, result)
    }

    fn table_stats(&self) -> Option<TtStats> {
        self.inner.table_stats()
    }
}

/// Keeps only the first `limit` children after the inner ordering.
///
/// The search is no longer exhaustive: a move cut here is never examined.
#[derive(Clone, Debug)]
pub struct BreadthLimited<S> {
    inner: S,
    limit: usize,
}

impl<S> BreadthLimited<S> {
    /// `limit` is raised to 1 if zero.
    pub fn new(inner: S, limit: usize) -> Self {
        Self {
            inner,
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl<G: Game, S: SearchStrategy<G>> SearchStrategy<G> for BreadthLimited<S> {
    fn evaluate(&mut self, game: &G, state: &G::State, perspective: Side) -> f32 {
        self.inner.evaluate(game, state, perspective)
    }

    fn score_child(
        &mut self,
        game: &G,
        parent: &G::State,
        child: &G::State,
        action: G::Action,
        perspective: Side,
    ) -> f32 {
        self.inner.score_child(game, parent, child, action, perspective)
    }

    fn order_children(&mut self, children: &mut Vec<Child<G>>, maximizing: bool) {
        self.inner.order_children(children, maximizing);
        children.truncate(self.limit);
    }

    fn on_search_start(&mut self, game: &G, root: &G::State) {
        self.inner.on_search_start(game, root)
    }

    fn on_node_enter(
        &mut self,
        game: &G,
        state: &G::State,
        depth: u32,
        window: &mut Window,
    ) -> Option<Scored<G::Action>> {
        self.inner.on_node_enter(game, state, depth, window)
    }

    fn on_node_exit(
        &mut self,
        game: &G,
        state: &G::State,
        depth: u32,
        searched: Window,
        result: Scored<G::Action>,
    ) {
        self.inner.on_node_exit(game, state, depth, searched, result)
    }

    fn table_stats(&self) -> Option<TtStats> {
        self.inner.table_stats()
    }
}

/// Probes a transposition table before expanding a node and stores the
/// node's value afterwards.
///
/// The table is cleared at the start of every search, so stored values never
/// outlive the perspective they were computed for.
pub struct TableBacked<G: Game, S> {
    inner: S,
    keys: ZobristKeys,
    table: TranspositionTable<G::Action>,
    /// Key of the node currently open at each depth
    open: Vec<u64>,
}

impl<G: Game, S> TableBacked<G, S> {
    pub fn new(inner: S, keys: ZobristKeys, table: TranspositionTable<G::Action>) -> Self {
        Self {
            inner,
            keys,
            table,
            open: Vec::new(),
        }
    }

    pub fn table(&self) -> &TranspositionTable<G::Action> {
        &self.table
    }
}

impl<G: Game, S: SearchStrategy<G>> SearchStrategy<G> for TableBacked<G, S> {
    fn evaluate(&mut self, game: &G, state: &G::State, perspective: Side) -> f32 {
        self.inner.evaluate(game, state, perspective)
    }

    fn score_child(
        &mut self,
        game: &G,
        parent: &G::State,
        child: &G::State,
        action: G::Action,
        perspective: Side,
    ) -> f32 {
        self.inner.score_child(game, parent, child, action, perspective)
    }

    fn order_children(&mut self, children: &mut Vec<Child<G>>, maximizing: bool) {
        self.inner.order_children(children, maximizing)
    }

    fn on_search_start(&mut self, game: &G, root: &G::State) {
        self.table.clear();
        self.open.clear();
        self.inner.on_search_start(game, root)
    }

    fn on_node_enter(
        &mut self,
        game: &G,
        state: &G::State,
        depth: u32,
        window: &mut Window,
    ) -> Option<Scored<G::Action>> {
        let key = self.keys.key(game, state);
        let slot = depth as usize;
        if self.open.len() <= slot {
            self.open.resize(slot + 1, 0);
        }
        self.open[slot] = key;

        if let Some(entry) = self.table.get(key, depth) {
            let hit = Scored {
                value: entry.value,
                action: entry.best,
            };
            match entry.bound {
                Bound::Exact => return Some(hit),
                Bound::Lower => window.alpha = window.alpha.max(entry.value),
                Bound::Upper => window.beta = window.beta.min(entry.value),
            }
            if window.is_closed() {
                return Some(hit);
            }
        }

        self.inner.on_node_enter(game, state, depth, window)
    }

    fn on_node_exit(
        &mut self,
        game: &G,
        state: &G::State,
        depth: u32,
        searched: Window,
        result: Scored<G::Action>,
    ) {
        // Nodes nest, so the slot still holds this node's key
        if let Some(&key) = self.open.get(depth as usize) {
            self.table.put(
                key,
                TtEntry {
                    value: result.value,
                    best: result.action,
                    depth,
                    bound: Bound::classify(result.value, searched.alpha, searched.beta),
                },
            );
        }
        self.inner.on_node_exit(game, state, depth, searched, result)
    }

    fn table_stats(&self) -> Option<TtStats> {
        Some(self.table.stats())
    }
}

/// Compare two scores the way the maximizing or minimizing side prefers.
pub(crate) fn prefers(maximizing: bool, candidate: f32, best: f32) -> bool {
    match candidate.partial_cmp(&best) {
        Some(Ordering::Greater) => maximizing,
        Some(Ordering::Less) => !maximizing,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abalone_board::{Abalone, Position};
    use crate::evaluator::AbaloneEvaluator;
    use crate::tt::ReplacementPolicy;

    fn children(scores: &[f32]) -> Vec<Child<Abalone>> {
        let pos = Position::starting();
        let moves = pos.legal_moves();
        scores
            .iter()
            .zip(moves)
            .map(|(&score, action)| Child {
                action,
                state: pos.make_move(action),
                score,
            })
            .collect()
    }

    fn scores(children: &[Child<Abalone>]) -> Vec<f32> {
        children.iter().map(|c| c.score).collect()
    }

    #[test]
    fn test_sort_children_is_stable() {
        let mut list = children(&[1.0, 3.0, 1.0, 2.0]);
        let first_one = list[0].action;
        let second_one = list[2].action;

        sort_children(&mut list, true);
        assert_eq!(scores(&list), vec![3.0, 2.0, 1.0, 1.0]);
        assert_eq!(list[2].action, first_one);
        assert_eq!(list[3].action, second_one);

        sort_children(&mut list, false);
        assert_eq!(scores(&list), vec![1.0, 1.0, 2.0, 3.0]);
        assert_eq!(list[0].action, first_one);
    }

    #[test]
    fn test_breadth_limited_truncates_after_ordering() {
        let eval = AbaloneEvaluator::default();
        let mut strategy = BreadthLimited::new(Ordered::new(Simple::new(eval.clone()), eval), 2);
        let mut list = children(&[1.0, 5.0, 3.0, 4.0]);
        SearchStrategy::<Abalone>::order_children(&mut strategy, &mut list, true);
        assert_eq!(scores(&list), vec![5.0, 4.0]);
    }

    #[test]
    fn test_breadth_limit_at_least_one() {
        let strategy = BreadthLimited::new(Simple::new(AbaloneEvaluator::default()), 0);
        assert_eq!(strategy.limit(), 1);
    }

    #[test]
    fn test_table_backed_tightens_window() {
        let game = Abalone::default();
        let pos = Position::starting();
        let mut strategy: TableBacked<Abalone, _> = TableBacked::new(
            Simple::new(AbaloneEvaluator::default()),
            ZobristKeys::new(61, 9),
            TranspositionTable::new(ReplacementPolicy::KeepDeepest),
        );
        strategy.on_search_start(&game, &pos);

        // Nothing stored yet
        let mut window = Window::FULL;
        assert!(strategy.on_node_enter(&game, &pos, 2, &mut window).is_none());

        // Searched with (0, 10), failed high at 20: a lower bound
        let searched = Window {
            alpha: 0.0,
            beta: 10.0,
        };
        strategy.on_node_exit(&game, &pos, 2, searched, Scored::leaf(20.0));

        let mut window = Window {
            alpha: -5.0,
            beta: 50.0,
        };
        assert!(strategy.on_node_enter(&game, &pos, 2, &mut window).is_none());
        assert_eq!(window.alpha, 20.0);

        // The bound closes a window whose beta is below it
        let mut window = Window {
            alpha: -5.0,
            beta: 15.0,
        };
        let hit = strategy.on_node_enter(&game, &pos, 2, &mut window);
        assert_eq!(hit.map(|s| s.value), Some(20.0));

        // Too shallow for a deeper probe
        let mut window = Window::FULL;
        assert!(strategy.on_node_enter(&game, &pos, 3, &mut window).is_none());
        assert_eq!(window, Window::FULL);

        let stats = strategy.table_stats().unwrap();
        assert_eq!(stats.stores, 1);
        assert_eq!(stats.lower, 1);
    }

    #[test]
    fn test_table_cleared_between_searches() {
        let game = Abalone::default();
        let pos = Position::starting();
        let mut strategy: TableBacked<Abalone, _> = TableBacked::new(
            Simple::new(AbaloneEvaluator::default()),
            ZobristKeys::new(61, 9),
            TranspositionTable::new(ReplacementPolicy::KeepDeepest),
        );
        strategy.on_search_start(&game, &pos);
        let mut window = Window::FULL;
        strategy.on_node_enter(&game, &pos, 1, &mut window);
        strategy.on_node_exit(&game, &pos, 1, Window::FULL, Scored::leaf(1.0));
        assert_eq!(strategy.table().len(), 1);

        strategy.on_search_start(&game, &pos);
        assert!(strategy.table().is_empty());
    }

    #[test]
    fn test_prefers() {
        assert!(prefers(true, 2.0, 1.0));
        assert!(!prefers(true, 1.0, 1.0));
        assert!(prefers(false, 1.0, 2.0));
        assert!(!prefers(false, 2.0, 2.0));
        assert!(prefers(true, 0.0, f32::NEG_INFINITY));
    }
}
