//! Abalone move representation.
//!
//! An inline move names the trailing marble of a column and the direction the
//! column travels in; the marbles ahead of it (own, then opposing) follow from
//! the position. A broadside move names both ends of a 2-3 marble line and the
//! sideways step every marble of the line takes.

use std::fmt;

use abalone_core::Side;

use crate::{Cell, Direction};

/// An Abalone move
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Move {
    /// Column of 1-3 marbles moving along its own axis, possibly pushing
    Inline { trailing: Cell, direction: Direction },
    /// Line of 2-3 marbles stepping sideways into empty cells
    Broadside {
        first: Cell,
        last: Cell,
        direction: Direction,
    },
}

impl Move {
    #[inline]
    pub const fn inline(trailing: Cell, direction: Direction) -> Self {
        Move::Inline {
            trailing,
            direction,
        }
    }

    #[inline]
    pub const fn broadside(first: Cell, last: Cell, direction: Direction) -> Self {
        Move::Broadside {
            first,
            last,
            direction,
        }
    }

    /// Direction every moved marble travels in
    #[inline]
    pub const fn direction(self) -> Direction {
        match self {
            Move::Inline { direction, .. } | Move::Broadside { direction, .. } => direction,
        }
    }

    /// The cell the move is anchored on (trailing marble or first line end)
    #[inline]
    pub const fn origin(self) -> Cell {
        match self {
            Move::Inline { trailing, .. } => trailing,
            Move::Broadside { first, .. } => first,
        }
    }

    #[inline]
    pub const fn is_broadside(self) -> bool {
        matches!(self, Move::Broadside { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Inline {
                trailing,
                direction,
            } => write!(f, "{} {}", trailing, direction),
            Move::Broadside {
                first,
                last,
                direction,
            } => write!(f, "{}-{} {}", first, last, direction),
        }
    }
}

/// Human-readable record of the `number`-th move of a game, e.g.
/// `"3: BLACK moves A1, A3 in direction NorthEast"`.
pub fn format_move(number: usize, side: Side, mv: Move) -> String {
    match mv {
        Move::Inline {
            trailing,
            direction,
        } => format!("{}: {} moves {} in direction {}", number, side, trailing, direction),
        Move::Broadside {
            first,
            last,
            direction,
        } => format!(
            "{}: {} moves {}, {} in direction {}",
            number, side, first, last, direction
        ),
    }
}
