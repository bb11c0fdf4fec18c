//! Monte Carlo tree search with random playouts.
//!
//! Each iteration picks a node, plays uniformly random moves from it until
//! the game ends or the ply cap is hit, and credits the result to every node
//! from the picked one up to the root. A playout that ends in an elimination
//! counts for the winner. One stopped by the ply cap is judged from the root
//! side: more opposing marbles pushed off than own marbles lost is a win, the
//! reverse a loss, anything else undecided.
//!
//! Two ways of picking nodes are supported (see [`ExpansionPolicy`]): a fixed
//! cycle over all root moves, or UCT descent over a tree grown a batch of
//! best-scored children at a time.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use abalone_core::{Game, Score, Side};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::config::{ExpansionPolicy, FinalSelection, MctsConfig};
use crate::evaluator::MoveScorer;
use crate::node::NodeId;
use crate::tree::Tree;

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct MctsResult<A> {
    /// Root move chosen by the final selection policy
    pub best_action: A,
    /// Visit count of every root child, in expansion order
    pub visit_counts: Vec<(A, u32)>,
    /// Root side's win rate through the chosen move
    pub win_rate: f32,
    pub iterations: u64,
    pub tree_size: usize,
    pub elapsed: Duration,
}

/// Monte Carlo tree search.
///
/// Generic over:
/// - `G`: The game being played
/// - `M`: The move scorer ordering UCT expansions
/// - `R`: The random number generator driving playouts
pub struct MonteCarlo<G: Game, M, R> {
    config: MctsConfig,
    scorer: M,
    rng: R,
    tree: Tree<G::State, G::Action>,
    root_side: Side,
    root_score: Score,
    cursor: usize,
}

impl<G, M, R> MonteCarlo<G, M, R>
where
    G: Game,
    M: MoveScorer<G>,
    R: Rng,
{
    /// A UCT breadth of zero is raised to one.
    pub fn new(mut config: MctsConfig, scorer: M, rng: R) -> Self {
        if let ExpansionPolicy::Uct { breadth } = &mut config.expansion {
            *breadth = (*breadth).max(1);
        }
        Self {
            config,
            scorer,
            rng,
            tree: Tree::new(),
            root_side: Side::Black,
            root_score: Score::INITIAL,
            cursor: 0,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run MCTS from `state` until the time budget or the iteration cap is
    /// spent.
    ///
    /// The budget is polled once per iteration, so the search may overrun it
    /// by one playout. With no budget at all the first expanded root move is
    /// returned. Returns `None` only if `state` has no legal moves.
    pub fn search(&mut self, game: &G, state: &G::State) -> Option<MctsResult<G::Action>> {
        let start = Instant::now();
        self.tree.reset(state.clone());
        self.root_side = game.side_to_move(state);
        self.root_score = game.score(state);
        self.cursor = 0;

        let root_breadth = match self.config.expansion {
            ExpansionPolicy::RoundRobin => None,
            ExpansionPolicy::Uct { breadth } => Some(breadth),
        };
        self.expand(game, NodeId::ROOT, root_breadth);

        let budget = self.config.time_budget();
        let max_iterations = self.config.max_iterations.unwrap_or(u64::MAX);
        let mut iterations = 0;
        while !self.tree.root().children.is_empty()
            && iterations < max_iterations
            && start.elapsed() < budget
        {
            let leaf = match self.config.expansion {
                ExpansionPolicy::RoundRobin => self.next_round_robin(),
                ExpansionPolicy::Uct { breadth } => self.descend(game, breadth),
            };
            let winner = self.playout(game, leaf);
            self.backpropagate(leaf, winner);
            iterations += 1;
        }

        let result = self.select_final(iterations, start.elapsed())?;
        debug!(
            iterations = result.iterations,
            tree_size = result.tree_size,
            win_rate = result.win_rate,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "mcts search complete"
        );
        Some(result)
    }

    /// Generate children of `id`. With a breadth, only the best `breadth`
    /// moves for the side to move are added, best first; without one every
    /// move is added in generation order. Returns the first new child.
    fn expand(&mut self, game: &G, id: NodeId, breadth: Option<usize>) -> Option<NodeId> {
        let node = self.tree.get_mut(id);
        node.expanded = true;
        let state = node.state.clone();
        if game.is_terminal(&state) {
            return None;
        }

        let actions = game.legal_actions(&state);
        let children: Vec<(G::Action, G::State)> = match breadth {
            None => actions
                .into_iter()
                .map(|action| (action, game.apply(&state, action)))
                .collect(),
            Some(breadth) => {
                let mover = game.side_to_move(&state);
                let mut scored: Vec<(f32, G::Action, G::State)> = actions
                    .into_iter()
                    .map(|action| {
                        let next = game.apply(&state, action);
                        let score = self.scorer.score_move(game, &state, &next, action, mover);
                        (score, action, next)
                    })
                    .collect();
                scored.sort_by(|a, b| b.0.total_cmp(&a.0));
                scored
                    .into_iter()
                    .take(breadth)
                    .map(|(_, action, next)| (action, next))
                    .collect()
            }
        };

        let mut first = None;
        for (action, next) in children {
            let child = self.tree.add_child(id, next, action);
            first.get_or_insert(child);
        }
        first
    }

    /// Next root child in the fixed cycle.
    fn next_round_robin(&mut self) -> NodeId {
        let children = &self.tree.root().children;
        let id = children[self.cursor % children.len()];
        self.cursor = (self.cursor + 1) % children.len();
        id
    }

    /// Follow the best UCT child down to a node that has not been expanded,
    /// expand it and return its first new child (or the node itself when it
    /// is terminal).
    fn descend(&mut self, game: &G, breadth: usize) -> NodeId {
        let mut id = NodeId::ROOT;
        loop {
            if !self.tree.get(id).expanded {
                return self.expand(game, id, Some(breadth)).unwrap_or(id);
            }
            match select_child(&self.tree, id, self.root_side, self.config.exploration) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    fn playout(&mut self, game: &G, id: NodeId) -> Option<Side> {
        let mut state = self.tree.get(id).state.clone();
        let mut plies = 0;
        while plies < self.config.max_plies && !game.is_terminal(&state) {
            let actions = game.legal_actions(&state);
            let Some(&action) = actions.choose(&mut self.rng) else {
                break;
            };
            state = game.apply(&state, action);
            plies += 1;
        }
        self.judge(&game.score(&state))
    }

    /// Winner of a playout ending at `score`. An elimination decides the
    /// game outright; otherwise the marble balance against the root decides.
    fn judge(&self, score: &Score) -> Option<Side> {
        if score.is_decided() {
            return score.winner();
        }
        let us = self.root_side;
        let them = us.opposite();
        let won = self.root_score.remaining(them).saturating_sub(score.remaining(them));
        let lost = self.root_score.remaining(us).saturating_sub(score.remaining(us));
        match won.cmp(&lost) {
            Ordering::Greater => Some(us),
            Ordering::Less => Some(them),
            Ordering::Equal => None,
        }
    }

    /// Credit the result to `id` and each of its ancestors.
    fn backpropagate(&mut self, id: NodeId, winner: Option<Side>) {
        let mut cursor = Some(id);
        while let Some(id) = cursor {
            let node = self.tree.get_mut(id);
            node.stats.record(winner);
            cursor = node.parent;
        }
    }

    fn select_final(&self, iterations: u64, elapsed: Duration) -> Option<MctsResult<G::Action>> {
        let root = self.tree.root();
        let side = self.root_side;
        let best = root.children.iter().copied().reduce(|best, child| {
            let (b, c) = (self.tree.get(best).stats, self.tree.get(child).stats);
            let better = match self.config.final_selection {
                FinalSelection::MostVisited => c.visits > b.visits,
                FinalSelection::BestWinRate => c.win_rate(side) > b.win_rate(side),
            };
            if better {
                child
            } else {
                best
            }
        })?;
        let chosen = self.tree.get(best);

        Some(MctsResult {
            best_action: chosen.action?,
            visit_counts: root
                .children
                .iter()
                .filter_map(|&id| {
                    let node = self.tree.get(id);
                    node.action.map(|action| (action, node.stats.visits))
                })
                .collect(),
            win_rate: chosen.stats.win_rate(side),
            iterations,
            tree_size: self.tree.len(),
            elapsed,
        })
    }
}

/// Child of `id` with the highest UCT score; the first one wins ties.
pub(crate) fn select_child<S, A>(
    tree: &Tree<S, A>,
    id: NodeId,
    root_side: Side,
    exploration: f32,
) -> Option<NodeId> {
    let node = tree.get(id);
    let parent_visits = node.stats.visits;
    let mut best: Option<(NodeId, f32)> = None;
    for &child in &node.children {
        let score = tree.get(child).stats.uct(parent_visits, root_side, exploration);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((child, score));
        }
    }
    best.map(|(child, _)| child)
}
