//! Implementation of the `Game` trait for Abalone.

use abalone_core::hex::CELL_COUNT;
use abalone_core::{Game, Score, Side};

use crate::{Layout, Move, Position};

/// Abalone game implementation for the search crates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Abalone {
    /// Arrangement returned by `initial_state`
    pub layout: Layout,
}

impl Abalone {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }
}

impl Game for Abalone {
    type State = Position;
    type Action = Move;

    fn initial_state(&self) -> Position {
        Position::from_layout(self.layout)
    }

    fn legal_actions(&self, state: &Position) -> Vec<Move> {
        state.legal_moves()
    }

    fn apply(&self, state: &Position, action: Move) -> Position {
        state.make_move(action)
    }

    fn side_to_move(&self, state: &Position) -> Side {
        state.side_to_move()
    }

    fn score(&self, state: &Position) -> Score {
        state.score()
    }

    fn is_terminal(&self, state: &Position) -> bool {
        state.is_terminal()
    }

    fn occupied_cells(&self, state: &Position, out: &mut Vec<(Side, usize)>) {
        for side in Side::ALL {
            out.extend(state.marbles(side).iter().map(|cell| (side, cell.index())));
        }
    }

    fn num_cells(&self) -> usize {
        CELL_COUNT
    }
}
