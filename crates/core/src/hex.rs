//! Hexagonal coordinates for the Abalone board.
//!
//! The board is stored as 9 rows of widths 5, 6, 7, 8, 9, 8, 7, 6, 5 (row 0 at
//! the top). Rows above the middle row start one column further to the right
//! in axial space than the row below them; rows below the middle row all start
//! at the same axial column. `HexCube::from_board_array` and
//! `HexCube::to_board_array` encode that asymmetry.

use std::fmt;
use std::ops::{Add, Sub};

/// Width of each board row, top to bottom.
pub const ROW_WIDTHS: [u8; 9] = [5, 6, 7, 8, 9, 8, 7, 6, 5];

/// Number of rows on the board.
pub const BOARD_ROWS: usize = 9;

/// Number of playable cells.
pub const CELL_COUNT: usize = 61;

/// Index of the widest row.
pub const MIDDLE_ROW: i32 = 4;

/// Unit offsets to the six neighbors, in the order
/// East, NorthEast, NorthWest, West, SouthWest, SouthEast.
pub const NEIGHBOR_OFFSETS: [HexCube; 6] = [
    HexCube { x: 1, y: -1, z: 0 },
    HexCube { x: 1, y: 0, z: -1 },
    HexCube { x: 0, y: 1, z: -1 },
    HexCube { x: -1, y: 1, z: 0 },
    HexCube { x: -1, y: 0, z: 1 },
    HexCube { x: 0, y: -1, z: 1 },
];

/// Cube coordinate of the center cell (column 4 of the middle row).
pub const CENTER: HexCube = HexCube::from_board_array(4, 4);

/// Cube coordinate on a hex grid.
///
/// Invariant: `x + y + z == 0`. The fields are private so the invariant can
/// only be established through the constructors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexCube {
    x: i32,
    y: i32,
    z: i32,
}

impl HexCube {
    /// Creates a cube coordinate, returning None if `x + y + z != 0`
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Option<Self> {
        if x + y + z == 0 {
            Some(HexCube { x, y, z })
        } else {
            None
        }
    }

    #[inline]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn z(self) -> i32 {
        self.z
    }

    /// Converts an axial coordinate (`x = q`, `z = r`, `y = -q - r`)
    #[inline]
    pub const fn from_axial(axial: HexAxial) -> Self {
        HexCube {
            x: axial.q,
            y: -axial.q - axial.r,
            z: axial.r,
        }
    }

    #[inline]
    pub const fn to_axial(self) -> HexAxial {
        HexAxial {
            q: self.x,
            r: self.z,
        }
    }

    /// Maps a board-array cell (column within its row, row index) to cube space.
    ///
    /// The result is a valid cube coordinate for any input; only cells with
    /// [`is_on_board`] map back to themselves.
    #[inline]
    pub const fn from_board_array(col: i32, row: i32) -> Self {
        let q = if row < MIDDLE_ROW + 1 {
            col - row
        } else {
            col - MIDDLE_ROW
        };
        Self::from_axial(HexAxial { q, r: row })
    }

    /// Inverse of [`HexCube::from_board_array`].
    ///
    /// Off-board coordinates map to `(col, row)` pairs outside the board
    /// bounds; callers must check [`is_on_board`] before indexing.
    #[inline]
    pub const fn to_board_array(self) -> (i32, i32) {
        let row = self.z;
        let col = if row < MIDDLE_ROW + 1 {
            self.x + row
        } else {
            self.x + MIDDLE_ROW
        };
        (col, row)
    }

    /// Board-array cell for this coordinate, None if it lies off the board
    #[inline]
    pub fn board_cell(self) -> Option<(u8, u8)> {
        let (col, row) = self.to_board_array();
        if is_on_board(col, row) {
            Some((col as u8, row as u8))
        } else {
            None
        }
    }

    /// Hex-grid step distance, `max(|dx|, |dy|, |dz|)`
    #[inline]
    pub const fn distance(self, other: HexCube) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        let dz = (self.z - other.z).abs();
        let m = if dx > dy { dx } else { dy };
        if m > dz {
            m
        } else {
            dz
        }
    }

    /// The six adjacent coordinates, in [`NEIGHBOR_OFFSETS`] order
    pub fn neighbors(self) -> [HexCube; 6] {
        NEIGHBOR_OFFSETS.map(|offset| self + offset)
    }

    /// Returns the coordinate scaled by `n`
    #[inline]
    pub const fn scale(self, n: i32) -> Self {
        HexCube {
            x: self.x * n,
            y: self.y * n,
            z: self.z * n,
        }
    }
}

impl Add for HexCube {
    type Output = HexCube;

    #[inline]
    fn add(self, rhs: HexCube) -> HexCube {
        HexCube {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for HexCube {
    type Output = HexCube;

    #[inline]
    fn sub(self, rhs: HexCube) -> HexCube {
        HexCube {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl fmt::Debug for HexCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexCube({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<HexAxial> for HexCube {
    fn from(axial: HexAxial) -> Self {
        HexCube::from_axial(axial)
    }
}

/// Axial coordinate `(q, r)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct HexAxial {
    pub q: i32,
    pub r: i32,
}

impl HexAxial {
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        HexAxial { q, r }
    }
}

impl From<HexCube> for HexAxial {
    fn from(cube: HexCube) -> Self {
        cube.to_axial()
    }
}

/// True if `(col, row)` addresses a playable cell
#[inline]
pub const fn is_on_board(col: i32, row: i32) -> bool {
    row >= 0 && row < BOARD_ROWS as i32 && col >= 0 && col < ROW_WIDTHS[row as usize] as i32
}

/// The six unit offsets to neighboring cells
#[inline]
pub const fn neighbor_offsets() -> [HexCube; 6] {
    NEIGHBOR_OFFSETS
}

/// Iterates over every playable `(col, row)` cell, row by row
pub fn board_cells() -> impl Iterator<Item = (i32, i32)> {
    (0..BOARD_ROWS as i32)
        .flat_map(|row| (0..ROW_WIDTHS[row as usize] as i32).map(move |col| (col, row)))
}
