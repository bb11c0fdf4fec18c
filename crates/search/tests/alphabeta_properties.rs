//! Alpha-beta against plain minimax on small synthetic games.
//!
//! Every strategy composition must reproduce the value of an unpruned
//! minimax over the same tree. Breadth-limited searches are compared with a
//! minimax that truncates children the same way. The trees share nodes
//! between parents so table-backed searches actually hit their table.

use abalone_core::{Game, Score, Side};
use abalone_search::{
    sort_children, AlphaBeta, BreadthLimited, Child, MoveScorer, Ordered, ReplacementPolicy,
    SearchStrategy, Simple, StaticEvaluator, TableBacked, TranspositionTable, ZobristKeys,
};
use proptest::prelude::*;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// A game whose states are the nodes of an explicit graph
// =============================================================================

#[derive(Clone, Debug)]
struct TreeGame {
    children: Vec<Vec<usize>>,
    /// Static value of every node, from Black's point of view
    values: Vec<f32>,
    first: Side,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Node {
    id: usize,
    to_move: Side,
}

impl TreeGame {
    /// Random layered graph of `depth + 1` levels. Each node links to
    /// 1..=`branch` nodes of the next level, and nodes of one level are
    /// shared between parents, so the same state is reached along different
    /// paths. Values are small integers so ties are common.
    fn generate(seed: u64, depth: u32, branch: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let first = if rng.gen_bool(0.5) {
            Side::Black
        } else {
            Side::White
        };

        let mut levels: Vec<Vec<usize>> = vec![vec![0]];
        let mut count = 1;
        for _ in 0..depth {
            let width = rng.gen_range(1..=2 * branch);
            levels.push((count..count + width).collect());
            count += width;
        }

        let values: Vec<f32> = (0..count).map(|_| rng.gen_range(-20..=20) as f32).collect();
        let mut children = vec![Vec::new(); count];
        for (level, nodes) in levels.iter().enumerate().take(depth as usize) {
            let next = &levels[level + 1];
            for &id in nodes {
                if level > 0 && rng.gen_bool(0.15) {
                    continue;
                }
                let k = rng.gen_range(1..=branch).min(next.len());
                children[id] = sample(&mut rng, next.len(), k)
                    .into_iter()
                    .map(|i| next[i])
                    .collect();
            }
        }

        TreeGame {
            children,
            values,
            first,
        }
    }
}

impl Game for TreeGame {
    type State = Node;
    type Action = usize;

    fn initial_state(&self) -> Node {
        Node {
            id: 0,
            to_move: self.first,
        }
    }

    fn legal_actions(&self, state: &Node) -> Vec<usize> {
        self.children[state.id].clone()
    }

    fn apply(&self, state: &Node, action: usize) -> Node {
        Node {
            id: action,
            to_move: state.to_move.opposite(),
        }
    }

    fn side_to_move(&self, state: &Node) -> Side {
        state.to_move
    }

    fn score(&self, _state: &Node) -> Score {
        Score::INITIAL
    }

    fn is_terminal(&self, state: &Node) -> bool {
        self.children[state.id].is_empty()
    }

    fn occupied_cells(&self, state: &Node, out: &mut Vec<(Side, usize)>) {
        out.push((state.to_move, state.id));
    }

    fn num_cells(&self) -> usize {
        self.values.len()
    }
}

#[derive(Clone, Copy, Debug)]
struct NodeValue;

impl NodeValue {
    fn of(game: &TreeGame, state: &Node, perspective: Side) -> f32 {
        let value = game.values[state.id];
        match perspective {
            Side::Black => value,
            Side::White => -value,
        }
    }
}

impl StaticEvaluator<TreeGame> for NodeValue {
    fn evaluate(&self, game: &TreeGame, state: &Node, perspective: Side) -> f32 {
        NodeValue::of(game, state, perspective)
    }

    fn win_value(&self) -> f32 {
        1_000.0
    }
}

impl MoveScorer<TreeGame> for NodeValue {
    fn score_move(
        &self,
        game: &TreeGame,
        _before: &Node,
        after: &Node,
        _action: usize,
        perspective: Side,
    ) -> f32 {
        NodeValue::of(game, after, perspective)
    }
}

// =============================================================================
// Reference minimax
// =============================================================================

#[derive(Clone, Copy, Debug)]
struct Reference {
    perspective: Side,
    ordered: bool,
    limit: Option<usize>,
}

impl Reference {
    /// Value and node count of an unpruned search.
    fn minimax(&self, game: &TreeGame, state: &Node, depth: u32) -> (f32, u64) {
        if depth == 0 || game.is_terminal(state) {
            return (NodeValue::of(game, state, self.perspective), 1);
        }
        let maximizing = state.to_move == self.perspective;

        let mut children: Vec<Child<TreeGame>> = game
            .legal_actions(state)
            .into_iter()
            .map(|action| {
                let next = game.apply(state, action);
                Child {
                    action,
                    state: next,
                    score: NodeValue::of(game, &next, self.perspective),
                }
            })
            .collect();
        if self.ordered {
            sort_children(&mut children, maximizing);
        }
        if let Some(limit) = self.limit {
            children.truncate(limit);
        }

        let mut nodes = 1;
        let mut best = if maximizing {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };
        for child in &children {
            let (value, count) = self.minimax(game, &child.state, depth - 1);
            nodes += count;
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        (best, nodes)
    }
}

fn table<S>(inner: S, game: &TreeGame, policy: ReplacementPolicy) -> TableBacked<TreeGame, S> {
    TableBacked::new(
        inner,
        ZobristKeys::new(game.num_cells(), 99),
        TranspositionTable::new(policy),
    )
}

/// Run `strategy`, check the value against `reference`, and check that
/// playing the chosen move keeps that value.
fn check<S: SearchStrategy<TreeGame>>(
    game: &TreeGame,
    strategy: S,
    depth: u32,
    reference: Reference,
) -> Result<(), TestCaseError> {
    let root = game.initial_state();
    let (expected, minimax_nodes) = reference.minimax(game, &root, depth);

    let mut search = AlphaBeta::new(strategy, depth);
    let outcome = search.search(game, &root);
    prop_assert_eq!(outcome.value, expected);
    prop_assert!(outcome.stats.nodes <= minimax_nodes);

    match outcome.best {
        Some(action) => {
            let child = game.apply(&root, action);
            let (value, _) = reference.minimax(game, &child, depth - 1);
            prop_assert_eq!(value, expected);
        }
        None => prop_assert!(game.is_terminal(&root)),
    }
    Ok(())
}

fn arb_tree() -> impl Strategy<Value = (TreeGame, u32)> {
    (any::<u64>(), 1u32..=4, 1usize..=4, 1u32..=4).prop_map(|(seed, depth, branch, search)| {
        (TreeGame::generate(seed, depth, branch), search)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_simple_matches_minimax((game, depth) in arb_tree()) {
        let reference = Reference { perspective: game.first, ordered: false, limit: None };
        check(&game, Simple::new(NodeValue), depth, reference)?;
    }

    #[test]
    fn prop_ordered_matches_minimax((game, depth) in arb_tree()) {
        let reference = Reference { perspective: game.first, ordered: false, limit: None };
        check(&game, Ordered::new(Simple::new(NodeValue), NodeValue), depth, reference)?;
    }

    #[test]
    fn prop_table_backed_matches_minimax((game, depth) in arb_tree()) {
        let reference = Reference { perspective: game.first, ordered: false, limit: None };
        let ordered = Ordered::new(Simple::new(NodeValue), NodeValue);
        check(&game, table(ordered, &game, ReplacementPolicy::KeepDeepest), depth, reference)?;
        let simple = Simple::new(NodeValue);
        check(&game, table(simple, &game, ReplacementPolicy::AlwaysReplace), depth, reference)?;
    }

    #[test]
    fn prop_breadth_limited_matches_truncated_minimax(
        (game, depth) in arb_tree(),
        limit in 1usize..=3,
    ) {
        let reference = Reference { perspective: game.first, ordered: true, limit: Some(limit) };
        let limited = BreadthLimited::new(Ordered::new(Simple::new(NodeValue), NodeValue), limit);
        check(&game, limited, depth, reference)?;

        let limited = BreadthLimited::new(Ordered::new(Simple::new(NodeValue), NodeValue), limit);
        check(&game, table(limited, &game, ReplacementPolicy::KeepDeepest), depth, reference)?;
    }

    #[test]
    fn prop_wide_limit_is_exhaustive((game, depth) in arb_tree()) {
        let reference = Reference { perspective: game.first, ordered: false, limit: None };
        let limited = BreadthLimited::new(Ordered::new(Simple::new(NodeValue), NodeValue), 4);
        check(&game, limited, depth, reference)?;
    }
}
