//! Precomputed per-cell geometry.
//!
//! Neighbor lookups and center distances are computed once from the hex
//! coordinate mapping and shared process-wide.

use std::sync::OnceLock;

use abalone_core::hex::{CELL_COUNT, CENTER};
use abalone_core::HexCube;

use crate::{Cell, CellSet, Direction};

/// Geometry tables indexed by cell.
pub struct BoardTables {
    cubes: [HexCube; CELL_COUNT],
    neighbors: [[Option<Cell>; 6]; CELL_COUNT],
    neighbor_masks: [CellSet; CELL_COUNT],
    center_distance: [u8; CELL_COUNT],
}

impl BoardTables {
    fn init() -> Self {
        let mut tables = BoardTables {
            cubes: [HexCube::default(); CELL_COUNT],
            neighbors: [[None; 6]; CELL_COUNT],
            neighbor_masks: [CellSet::EMPTY; CELL_COUNT],
            center_distance: [0; CELL_COUNT],
        };

        for (index, cube) in tables.cubes.iter_mut().enumerate() {
            let cell = Cell(index as u8);
            *cube = HexCube::from_board_array(cell.col() as i32, cell.row() as i32);
        }

        for index in 0..CELL_COUNT {
            let cube = tables.cubes[index];
            for dir in Direction::ALL {
                // Off-board coordinates are simply "no neighbor"
                let neighbor = Cell::from_cube(cube + dir.offset());
                tables.neighbors[index][dir.index()] = neighbor;
                if let Some(n) = neighbor {
                    tables.neighbor_masks[index].set(n);
                }
            }
            tables.center_distance[index] = cube.distance(CENTER) as u8;
        }

        tables
    }

    #[inline]
    pub fn cube(&self, cell: Cell) -> HexCube {
        self.cubes[cell.index()]
    }

    #[inline]
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        self.neighbors[cell.index()][dir.index()]
    }

    /// All on-board neighbors of `cell`
    #[inline]
    pub fn neighbor_mask(&self, cell: Cell) -> CellSet {
        self.neighbor_masks[cell.index()]
    }

    /// Hex distance from `cell` to the center cell (0-4)
    #[inline]
    pub fn center_distance(&self, cell: Cell) -> u8 {
        self.center_distance[cell.index()]
    }
}

static TABLES: OnceLock<BoardTables> = OnceLock::new();

/// Get a reference to the global geometry tables
pub fn tables() -> &'static BoardTables {
    TABLES.get_or_init(BoardTables::init)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_symmetric() {
        let t = tables();
        for cell in Cell::all() {
            for dir in Direction::ALL {
                if let Some(n) = t.neighbor(cell, dir) {
                    assert_eq!(t.neighbor(n, dir.opposite()), Some(cell));
                }
            }
        }
    }

    #[test]
    fn test_mask_matches_neighbors() {
        let t = tables();
        for cell in Cell::all() {
            let count = Direction::ALL
                .iter()
                .filter(|&&d| t.neighbor(cell, d).is_some())
                .count();
            assert_eq!(t.neighbor_mask(cell).popcount() as usize, count);
            assert!(!t.neighbor_mask(cell).contains(cell));
        }
    }

    #[test]
    fn test_center_distance() {
        let t = tables();
        let center = Cell::from_coords(4, 4).unwrap();
        assert_eq!(t.center_distance(center), 0);
        assert_eq!(t.center_distance(Cell::from_coords(0, 0).unwrap()), 4);
        assert_eq!(t.center_distance(Cell::from_coords(2, 6).unwrap()), 2);
    }
}
