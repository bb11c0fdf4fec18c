//! Shared domain types with enforced invariants.
//!
//! - Side: one of the two players, Black moves first
//! - Score: remaining marbles per side, never above the starting count

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AbaloneError, Result};

/// Marbles each side starts with.
pub const MARBLES_PER_SIDE: u8 = 14;

/// A side loses once its remaining marble count drops to this value.
pub const ELIMINATION_THRESHOLD: u8 = 8;

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Black, Side::White];

    /// Returns the other side
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Index for per-side arrays (Black = 0, White = 1)
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Character used in textual boards
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Side::Black => 'B',
            Side::White => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Side> {
        match c {
            'B' | 'b' => Some(Side::Black),
            'W' | 'w' => Some(Side::White),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "BLACK"),
            Side::White => write!(f, "WHITE"),
        }
    }
}

/// Remaining marbles per side.
///
/// Invariant: neither count exceeds [`MARBLES_PER_SIDE`]. Over the course of a
/// game both counts are non-increasing, marbles are only ever pushed off.
///
/// # Example
/// ```
/// use abalone_core::{Score, Side};
///
/// let score = Score::new(14, 8).unwrap();
/// assert!(score.is_decided());
/// assert_eq!(score.winner(), Some(Side::Black));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    black: u8,
    white: u8,
}

impl Score {
    /// Score at the start of a game.
    pub const INITIAL: Score = Score {
        black: MARBLES_PER_SIDE,
        white: MARBLES_PER_SIDE,
    };

    /// # Errors
    /// Returns `AbaloneError::InvalidPosition` if either count is above the
    /// starting marble count.
    pub fn new(black: u8, white: u8) -> Result<Self> {
        if black > MARBLES_PER_SIDE || white > MARBLES_PER_SIDE {
            return Err(AbaloneError::InvalidPosition(format!(
                "score ({}, {}) exceeds {} marbles per side",
                black, white, MARBLES_PER_SIDE
            )));
        }
        Ok(Self { black, white })
    }

    #[inline]
    pub const fn black(self) -> u8 {
        self.black
    }

    #[inline]
    pub const fn white(self) -> u8 {
        self.white
    }

    /// Remaining marbles of `side`
    #[inline]
    pub const fn remaining(self, side: Side) -> u8 {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    /// Marbles `side` has lost so far
    #[inline]
    pub const fn lost(self, side: Side) -> u8 {
        MARBLES_PER_SIDE - self.remaining(side)
    }

    /// True once either side has reached the elimination threshold.
    #[inline]
    pub const fn is_decided(self) -> bool {
        self.black <= ELIMINATION_THRESHOLD || self.white <= ELIMINATION_THRESHOLD
    }

    /// The side that has not been eliminated, if the game is decided.
    pub const fn winner(self) -> Option<Side> {
        if self.black <= ELIMINATION_THRESHOLD {
            Some(Side::White)
        } else if self.white <= ELIMINATION_THRESHOLD {
            Some(Side::Black)
        } else {
            None
        }
    }

    /// Returns a score with one marble of `side` removed.
    pub(crate) const fn with_loss(self, side: Side) -> Score {
        match side {
            Side::Black => Score {
                black: self.black.saturating_sub(1),
                white: self.white,
            },
            Side::White => Score {
                black: self.black,
                white: self.white.saturating_sub(1),
            },
        }
    }

    /// Removes one marble of `side`, as happens when it is pushed off.
    pub fn record_loss(&mut self, side: Side) {
        *self = self.with_loss(side);
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.black, self.white)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Black.opposite(), Side::White);
        assert_eq!(Side::White.opposite(), Side::Black);
        assert_eq!(Side::Black.index(), 0);
        assert_eq!(Side::White.index(), 1);
    }

    #[test]
    fn test_side_chars() {
        for side in Side::ALL {
            assert_eq!(Side::from_char(side.to_char()), Some(side));
        }
        assert_eq!(Side::from_char('.'), None);
    }

    #[test]
    fn test_score_rejects_overflow() {
        assert!(Score::new(15, 14).is_err());
        assert!(Score::new(14, 15).is_err());
        assert!(Score::new(0, 0).is_ok());
    }

    #[test]
    fn test_initial_score_undecided() {
        let score = Score::INITIAL;
        assert!(!score.is_decided());
        assert_eq!(score.winner(), None);
        assert_eq!(score.lost(Side::Black), 0);
    }

    #[test]
    fn test_threshold() {
        let one_above = Score::new(9, 14).unwrap();
        assert!(!one_above.is_decided());

        let mut score = one_above;
        score.record_loss(Side::Black);
        assert_eq!(score.black(), 8);
        assert!(score.is_decided());
        assert_eq!(score.winner(), Some(Side::White));
        assert_eq!(score.lost(Side::Black), 6);
    }
}
