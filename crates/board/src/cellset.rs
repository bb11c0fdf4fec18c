use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use abalone_core::hex::CELL_COUNT;

use crate::Cell;

/// A set of cells packed into a 64-bit integer.
/// Bit `i` corresponds to `Cell(i)`; bits 61-63 are always clear.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellSet(pub u64);

impl CellSet {
    /// Empty set
    pub const EMPTY: CellSet = CellSet(0);

    /// Every playable cell
    pub const ALL: CellSet = CellSet((1u64 << CELL_COUNT) - 1);

    /// Returns true if no cells are set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the given cell is set
    #[inline]
    pub const fn contains(self, cell: Cell) -> bool {
        (self.0 >> cell.0) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, cell: Cell) {
        self.0 |= 1u64 << cell.0;
    }

    #[inline]
    pub fn clear(&mut self, cell: Cell) {
        self.0 &= !(1u64 << cell.0);
    }

    /// Returns the number of cells in the set
    #[inline]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Pops and returns the lowest cell, removing it from the set
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Cell> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Cell(index))
    }

    /// Returns an iterator over all cells in ascending order
    #[inline]
    pub fn iter(self) -> CellSetIter {
        CellSetIter(self)
    }
}

/// Iterator over the cells of a [`CellSet`]
pub struct CellSetIter(CellSet);

impl Iterator for CellSetIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.popcount() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CellSetIter {}

impl IntoIterator for CellSet {
    type Item = Cell;
    type IntoIter = CellSetIter;

    fn into_iter(self) -> CellSetIter {
        self.iter()
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = CellSet::EMPTY;
        for cell in iter {
            set.set(cell);
        }
        set
    }
}

impl BitAnd for CellSet {
    type Output = CellSet;
    #[inline]
    fn bitand(self, rhs: CellSet) -> CellSet {
        CellSet(self.0 & rhs.0)
    }
}

impl BitAndAssign for CellSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: CellSet) {
        self.0 &= rhs.0;
    }
}

impl BitOr for CellSet {
    type Output = CellSet;
    #[inline]
    fn bitor(self, rhs: CellSet) -> CellSet {
        CellSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: CellSet) {
        self.0 |= rhs.0;
    }
}

impl BitXor for CellSet {
    type Output = CellSet;
    #[inline]
    fn bitxor(self, rhs: CellSet) -> CellSet {
        CellSet(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for CellSet {
    #[inline]
    fn bitxor_assign(&mut self, rhs: CellSet) {
        self.0 ^= rhs.0;
    }
}

impl Not for CellSet {
    type Output = CellSet;
    /// Complement within the playable cells
    #[inline]
    fn not(self) -> CellSet {
        CellSet(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
