use std::fmt;

use abalone_core::hex::{BOARD_ROWS, ROW_WIDTHS};
use abalone_core::{AbaloneError, Result, Score, Side};

use crate::{Cell, CellSet, Move};

/// Starting arrangements of the marbles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    /// The standard opening: each side fills its two back rows plus the
    /// three middle cells of the third row.
    #[default]
    Standard,
    /// Two seven-marble "daisies" per side on opposite flanks.
    GermanDaisy,
}

const STANDARD_ROWS: [&str; BOARD_ROWS] = [
    "WWWWW", "WWWWWW", "..WWW..", "........", ".........", "........", "..BBB..", "BBBBBB",
    "BBBBB",
];

const GERMAN_DAISY_ROWS: [&str; BOARD_ROWS] = [
    ".....", "WW..BB", "WWW.BBB", ".WW..BB.", ".........", ".BB..WW.", "BBB.WWW", "BB..WW",
    ".....",
];

impl Layout {
    fn rows(self) -> [&'static str; BOARD_ROWS] {
        match self {
            Layout::Standard => STANDARD_ROWS,
            Layout::GermanDaisy => GERMAN_DAISY_ROWS,
        }
    }
}

/// A complete Abalone position
///
/// Positions are small `Copy` values; applying a move produces a new
/// position and leaves the original untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Marbles indexed by `Side::index()`
    marbles: [CellSet; 2],
    /// Side to move
    side_to_move: Side,
    /// Remaining marbles per side, always equal to the per-side popcounts
    score: Score,
}

impl Position {
    /// Create the standard starting position, Black to move
    pub fn starting() -> Self {
        Self::from_layout(Layout::Standard)
    }

    /// Create the starting position of `layout`, Black to move
    pub fn from_layout(layout: Layout) -> Self {
        let mut marbles = [CellSet::EMPTY; 2];
        for (row, line) in layout.rows().iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                if let (Some(side), Some(cell)) =
                    (Side::from_char(c), Cell::from_coords(col as u8, row as u8))
                {
                    marbles[side.index()].set(cell);
                }
            }
        }
        Position {
            marbles,
            side_to_move: Side::Black,
            score: Score::INITIAL,
        }
    }

    /// Parse a position from 9 rows of `B`, `W` and `.` (or `-`), top row
    /// first. Whitespace inside a row is ignored.
    ///
    /// # Errors
    /// Returns `AbaloneError::InvalidPosition` if the shape is wrong, a
    /// character is unknown, or a side has more than 14 marbles.
    pub fn from_rows(rows: &[&str], side_to_move: Side) -> Result<Self> {
        if rows.len() != BOARD_ROWS {
            return Err(AbaloneError::InvalidPosition(format!(
                "expected {} rows, got {}",
                BOARD_ROWS,
                rows.len()
            )));
        }

        let mut marbles = [CellSet::EMPTY; 2];
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != ROW_WIDTHS[row] as usize {
                return Err(AbaloneError::InvalidPosition(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    cells.len(),
                    ROW_WIDTHS[row]
                )));
            }
            for (col, &c) in cells.iter().enumerate() {
                let cell = Cell::from_coords(col as u8, row as u8).ok_or_else(|| {
                    AbaloneError::InvalidPosition(format!("no cell at ({}, {})", col, row))
                })?;
                match c {
                    '.' | '-' => {}
                    _ => {
                        let side = Side::from_char(c).ok_or_else(|| {
                            AbaloneError::InvalidPosition(format!("unknown marble '{}'", c))
                        })?;
                        marbles[side.index()].set(cell);
                    }
                }
            }
        }

        let score = Score::new(
            marbles[Side::Black.index()].popcount() as u8,
            marbles[Side::White.index()].popcount() as u8,
        )?;

        Ok(Position {
            marbles,
            side_to_move,
            score,
        })
    }

    /// Get the marble on a cell, if any
    #[inline]
    pub fn marble_at(&self, cell: Cell) -> Option<Side> {
        if self.marbles[0].contains(cell) {
            Some(Side::Black)
        } else if self.marbles[1].contains(cell) {
            Some(Side::White)
        } else {
            None
        }
    }

    /// Cells occupied by `side`
    #[inline]
    pub fn marbles(&self, side: Side) -> CellSet {
        self.marbles[side.index()]
    }

    /// Cells occupied by either side
    #[inline]
    pub fn occupied(&self) -> CellSet {
        self.marbles[0] | self.marbles[1]
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Remaining marbles per side
    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// True once either side is down to the elimination threshold
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.score.is_decided()
    }

    #[inline]
    pub fn winner(&self) -> Option<Side> {
        self.score.winner()
    }

    /// Returns the same marbles with the other side to move
    pub fn with_side_to_move(mut self, side: Side) -> Self {
        self.side_to_move = side;
        self
    }

    /// Make a move, returning the new position with the other side to move.
    ///
    /// The move must be legal in this position; use [`Position::try_make_move`]
    /// for unchecked input.
    pub fn make_move(&self, mv: Move) -> Position {
        debug_assert!(self.is_legal(mv), "illegal move {} in\n{}", mv, self);

        let mut next = *self;
        let us = self.side_to_move;
        let them = us.opposite();

        match mv {
            Move::Inline {
                trailing,
                direction,
            } => {
                let probe = self.probe_inline(trailing, direction);
                let Some(head) = probe.head else {
                    return next.with_side_to_move(them);
                };

                next.marbles[us.index()].clear(trailing);
                next.marbles[us.index()].set(head);

                if probe.opposing > 0 {
                    next.marbles[them.index()].clear(head);
                    match probe.beyond {
                        Some(cell) => next.marbles[them.index()].set(cell),
                        None => next.score.record_loss(them),
                    }
                }
            }
            Move::Broadside {
                first,
                last,
                direction,
            } => {
                if let Some(line) = self.broadside_line(first, last) {
                    let own = &mut next.marbles[us.index()];
                    for &cell in line.cells() {
                        own.clear(cell);
                    }
                    for &cell in line.cells() {
                        if let Some(dest) = cell.neighbor(direction) {
                            own.set(dest);
                        }
                    }
                }
            }
        }

        next.side_to_move = them;
        next
    }

    /// Make a move after checking it is legal.
    ///
    /// # Errors
    /// Returns `AbaloneError::GameOver` on a finished game and
    /// `AbaloneError::IllegalMove` if the move breaks the rules.
    pub fn try_make_move(&self, mv: Move) -> Result<Position> {
        if self.is_terminal() {
            return Err(AbaloneError::GameOver);
        }
        if !self.is_legal(mv) {
            return Err(AbaloneError::IllegalMove(format!(
                "{} for {}",
                mv, self.side_to_move
            )));
        }
        Ok(self.make_move(mv))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_ROWS as u8 {
            let width = ROW_WIDTHS[row as usize];
            let letter = (b'I' - row) as char;
            write!(f, "{} {}", letter, " ".repeat(9 - width as usize))?;
            for col in 0..width {
                let c = Cell::from_coords(col, row)
                    .and_then(|cell| self.marble_at(cell))
                    .map_or('.', Side::to_char);
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "{} to move, score {}", self.side_to_move, self.score)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\n{}\n)", self)
    }
}
