use std::fmt;

use abalone_core::hex::{CELL_COUNT, MIDDLE_ROW, ROW_WIDTHS};
use abalone_core::HexCube;

use crate::{tables, CellSet, Direction};

/// Index of the first cell of each row.
const ROW_START: [u8; 9] = [0, 5, 11, 18, 26, 35, 43, 50, 56];

/// A playable cell (0-60) in row-major order, row 0 at the top.
///
/// In Abalone notation the top row is `I` (I5-I9) and the bottom row is `A`
/// (A1-A5).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Cell(pub(crate) u8);

impl Cell {
    /// Creates a cell from index, returning None if out of range
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < CELL_COUNT {
            Some(Cell(index))
        } else {
            None
        }
    }

    /// Creates a cell from index, panicking in debug builds if out of range
    #[inline]
    pub const fn new_unchecked(index: u8) -> Self {
        debug_assert!((index as usize) < CELL_COUNT);
        Cell(index)
    }

    /// Creates a cell from its column within a row and the row index
    #[inline]
    pub const fn from_coords(col: u8, row: u8) -> Option<Self> {
        if row < 9 && col < ROW_WIDTHS[row as usize] {
            Some(Cell(ROW_START[row as usize] + col))
        } else {
            None
        }
    }

    /// Cell at a cube coordinate, None if it lies off the board
    #[inline]
    pub fn from_cube(cube: HexCube) -> Option<Self> {
        let (col, row) = cube.board_cell()?;
        Cell::from_coords(col, row)
    }

    /// Returns the row (0-8, 0 = top)
    #[inline]
    pub const fn row(self) -> u8 {
        let mut row = 8;
        while ROW_START[row] > self.0 {
            row -= 1;
        }
        row as u8
    }

    /// Returns the column within the row
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 - ROW_START[self.row() as usize]
    }

    /// Returns the raw index (0-60)
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns a set with just this cell
    #[inline]
    pub const fn set(self) -> CellSet {
        CellSet(1u64 << self.0)
    }

    #[inline]
    pub fn cube(self) -> HexCube {
        tables().cube(self)
    }

    /// Adjacent cell in `dir`, None at the rim
    #[inline]
    pub fn neighbor(self, dir: Direction) -> Option<Cell> {
        tables().neighbor(self, dir)
    }

    /// Iterates over all 61 cells
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT as u8).map(Cell)
    }

    /// Row letter in Abalone notation ('A' = bottom row)
    #[inline]
    pub const fn row_char(self) -> char {
        (b'A' + (8 - self.row())) as char
    }

    /// Diagonal number in Abalone notation (1-9)
    #[inline]
    pub const fn number(self) -> u8 {
        self.col() + first_number(self.row())
    }

    /// Parse a cell from Abalone notation (e.g., "E5")
    pub fn from_notation(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let letter = bytes[0].to_ascii_uppercase();
        if !(b'A'..=b'I').contains(&letter) || !(b'1'..=b'9').contains(&bytes[1]) {
            return None;
        }
        let row = 8 - (letter - b'A');
        let number = bytes[1] - b'0';
        let col = number.checked_sub(first_number(row))?;
        Cell::from_coords(col, row)
    }
}

/// Number of the first cell in a row: rows in the lower half start at 1,
/// rows above the middle start further along the diagonals.
const fn first_number(row: u8) -> u8 {
    if row as i32 >= MIDDLE_ROW {
        1
    } else {
        5 - row
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_char(), self.number())
    }
}
