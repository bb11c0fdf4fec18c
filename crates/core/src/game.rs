use std::fmt::Debug;
use std::hash::Hash;

use crate::{Score, Side};

/// A rules engine the search can drive.
///
/// This trait defines everything the search needs from the game: move
/// generation, move application, the score and the occupied cells. States are
/// values; `apply` returns a new state and switches the side to move, so a
/// search can explore siblings without observing each other's mutations.
pub trait Game: Clone + Send + Sync {
    /// The game state (e.g., an Abalone position)
    type State: Clone + Send;

    /// A game action (e.g., an inline or broadside move)
    type Action: Clone + Copy + Send + Eq + Hash + Debug;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Returns all legal actions from the given state
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Applies an action, returning a new state with the other side to move
    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// The side whose turn it is
    fn side_to_move(&self, state: &Self::State) -> Side;

    /// Remaining marbles per side
    fn score(&self, state: &Self::State) -> Score;

    /// Returns true if the game has ended.
    ///
    /// Defaults to the elimination rule on [`Game::score`].
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.score(state).is_decided()
    }

    /// The winning side of a terminal state, `None` while the game is running
    fn winner(&self, state: &Self::State) -> Option<Side> {
        self.score(state).winner()
    }

    /// Appends every occupied `(side, cell index)` pair to `out`.
    ///
    /// Cell indices are below [`Game::num_cells`].
    fn occupied_cells(&self, state: &Self::State, out: &mut Vec<(Side, usize)>);

    /// Number of distinct cells a piece can occupy
    fn num_cells(&self) -> usize;
}
