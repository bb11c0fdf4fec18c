//! Position and move evaluation.
//!
//! The `StaticEvaluator` trait scores leaf positions for alpha-beta; the
//! `MoveScorer` trait scores a single move cheaply so children can be ordered
//! before they are searched. `AbaloneEvaluator` implements both for Abalone.

use abalone_board::{tables, Abalone, Move, Position};
use abalone_core::{Game, Side};

use crate::config::{HeuristicWeights, MaterialTerm, OrderingWeights};

/// Static evaluation function.
///
/// Values are from the point of view of `perspective`: positive favours it.
pub trait StaticEvaluator<G: Game> {
    /// Score a position for `perspective`.
    fn evaluate(&self, game: &G, state: &G::State, perspective: Side) -> f32;

    /// Value returned for a won position. A lost position scores its
    /// negation; any non-terminal score is strictly smaller in magnitude.
    fn win_value(&self) -> f32;
}

/// Move-level score used only for ordering.
pub trait MoveScorer<G: Game> {
    /// Score the move that led from `before` to `after`, for `perspective`.
    fn score_move(
        &self,
        game: &G,
        before: &G::State,
        after: &G::State,
        action: G::Action,
        perspective: Side,
    ) -> f32;
}

/// Orders moves by the full static value of the position they lead to.
#[derive(Clone, Debug)]
pub struct StaticValueScorer<E>(pub E);

impl<G: Game, E: StaticEvaluator<G>> MoveScorer<G> for StaticValueScorer<E> {
    fn score_move(
        &self,
        game: &G,
        _before: &G::State,
        after: &G::State,
        _action: G::Action,
        perspective: Side,
    ) -> f32 {
        self.0.evaluate(game, after, perspective)
    }
}

/// Per-side sums gathered in one scan over the occupied cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionFeatures {
    /// Same-colour neighbor pairs, each pair counted from both ends
    pub adjacency: [u32; 2],
    /// Sum of hex distances to the center cell
    pub center_distance: [u32; 2],
}

impl PositionFeatures {
    pub fn of(position: &Position) -> Self {
        let t = tables();
        let mut features = PositionFeatures::default();
        for side in Side::ALL {
            let own = position.marbles(side);
            for cell in own {
                features.adjacency[side.index()] += (t.neighbor_mask(cell) & own).popcount();
                features.center_distance[side.index()] += t.center_distance(cell) as u32;
            }
        }
        features
    }
}

/// Heuristic evaluator for Abalone: cohesion, centralization and material.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AbaloneEvaluator {
    weights: HeuristicWeights,
    ordering: OrderingWeights,
}

impl AbaloneEvaluator {
    pub fn new(weights: HeuristicWeights, ordering: OrderingWeights) -> Self {
        Self { weights, ordering }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    pub fn ordering_weights(&self) -> &OrderingWeights {
        &self.ordering
    }

    /// The raw per-side sums behind the positional terms.
    pub fn features(&self, position: &Position) -> PositionFeatures {
        PositionFeatures::of(position)
    }

    /// Static value of `position` for `perspective`.
    pub fn static_value(&self, position: &Position, perspective: Side) -> f32 {
        let w = &self.weights;

        // Must come first: the ratio term divides by the opponent's count
        if let Some(winner) = position.winner() {
            return if winner == perspective {
                w.win_value
            } else {
                -w.win_value
            };
        }

        let us = perspective.index();
        let them = perspective.opposite().index();
        let features = PositionFeatures::of(position);

        let adjacency = features.adjacency[us] as f32 - features.adjacency[them] as f32;
        let distance =
            features.center_distance[us] as f32 - features.center_distance[them] as f32;

        let score = position.score();
        let own = f32::from(score.remaining(perspective));
        let opp = f32::from(score.remaining(perspective.opposite()));
        let material = match w.material_term {
            MaterialTerm::Difference => own - opp,
            MaterialTerm::Ratio => own.ln() - opp.ln(),
        };

        w.adjacency * adjacency - w.distance * distance + w.material * material
    }

    /// Cheap score of `mv`, played from `before` and resulting in `after`.
    pub fn move_value(&self, before: &Position, after: &Position, mv: Move, perspective: Side) -> f32 {
        let w = &self.ordering;

        if let Some(winner) = after.winner() {
            return if winner == perspective {
                w.win_value
            } else {
                -w.win_value
            };
        }

        let opponent = perspective.opposite();
        let captured = before.score().remaining(opponent) - after.score().remaining(opponent);
        let lost = before.score().remaining(perspective) - after.score().remaining(perspective);

        let (multiple, attacking) = match mv {
            Move::Broadside { first, last, .. } => (first.cube().distance(last.cube()) as f32, 0.0),
            Move::Inline {
                trailing,
                direction,
            } => {
                let probe = before.probe_inline(trailing, direction);
                let attacking = if probe.opposing > 0 { 1.0 } else { 0.0 };
                (f32::from(probe.own.saturating_sub(1)), attacking)
            }
        };

        // Group moves and pushes are good for whoever makes them
        let sign = if before.side_to_move() == perspective {
            1.0
        } else {
            -1.0
        };

        sign * (w.multiple * multiple + w.attacking * attacking)
            + w.captured * f32::from(captured)
            - w.lost * f32::from(lost)
    }
}

impl StaticEvaluator<Abalone> for AbaloneEvaluator {
    fn evaluate(&self, _game: &Abalone, state: &Position, perspective: Side) -> f32 {
        self.static_value(state, perspective)
    }

    fn win_value(&self) -> f32 {
        self.weights.win_value
    }
}

impl MoveScorer<Abalone> for AbaloneEvaluator {
    fn score_move(
        &self,
        _game: &Abalone,
        before: &Position,
        after: &Position,
        action: Move,
        perspective: Side,
    ) -> f32 {
        self.move_value(before, after, action, perspective)
    }
}
