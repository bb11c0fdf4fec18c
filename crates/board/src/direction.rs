use std::fmt;

use abalone_core::hex::NEIGHBOR_OFFSETS;
use abalone_core::HexCube;

/// One of the six hex directions.
///
/// The discriminants index into [`NEIGHBOR_OFFSETS`]; opposite directions are
/// three steps apart.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Direction {
    East = 0,
    NorthEast = 1,
    NorthWest = 2,
    West = 3,
    SouthWest = 4,
    SouthEast = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Line directions used to enumerate broadside groups without duplicates:
    /// every line of marbles runs along exactly one of these.
    pub const LINE_AXES: [Direction; 3] =
        [Direction::East, Direction::SouthWest, Direction::SouthEast];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Direction> {
        if index < 6 {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        Self::ALL[(self as usize + 3) % 6]
    }

    /// True if `other` runs along the same axis, either way
    #[inline]
    pub const fn is_parallel(self, other: Direction) -> bool {
        self as usize % 3 == other as usize % 3
    }

    /// Unit cube offset for one step in this direction
    #[inline]
    pub const fn offset(self) -> HexCube {
        NEIGHBOR_OFFSETS[self as usize]
    }

    /// Direction of a unit offset, None if `delta` is not a unit step
    pub fn from_offset(delta: HexCube) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.offset() == delta)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
