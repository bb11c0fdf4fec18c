//! Property-based tests for the hex coordinate system.
//!
//! - Board-array <-> cube mapping is a bijection over the 61 cells
//! - Cube distance is a metric

use abalone_core::hex::{self, board_cells, is_on_board, CELL_COUNT, NEIGHBOR_OFFSETS};
use abalone_core::{HexAxial, HexCube};
use proptest::prelude::*;
use std::collections::HashSet;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Generate a valid board cell (col, row)
fn arb_board_cell() -> impl Strategy<Value = (i32, i32)> {
    (0usize..9).prop_flat_map(|row| {
        (0..hex::ROW_WIDTHS[row] as i32).prop_map(move |col| (col, row as i32))
    })
}

/// Generate an arbitrary cube coordinate, on or off the board
fn arb_cube() -> impl Strategy<Value = HexCube> {
    (-50i32..50, -50i32..50).prop_map(|(q, r)| HexCube::from_axial(HexAxial::new(q, r)))
}

// =============================================================================
// Board-array mapping
// =============================================================================

#[test]
fn test_round_trip_every_cell() {
    for (col, row) in board_cells() {
        let cube = HexCube::from_board_array(col, row);
        assert_eq!(cube.to_board_array(), (col, row));
        assert_eq!(cube.x() + cube.y() + cube.z(), 0);
    }
}

#[test]
fn test_mapping_is_injective() {
    let cubes: HashSet<HexCube> = board_cells()
        .map(|(c, r)| HexCube::from_board_array(c, r))
        .collect();
    assert_eq!(cubes.len(), CELL_COUNT);
}

#[test]
fn test_neighbor_counts() {
    // 6 corners with 3 neighbors, 18 other rim cells with 4, 37 interior with 6
    let mut histogram = [0usize; 7];
    for (col, row) in board_cells() {
        let cube = HexCube::from_board_array(col, row);
        let n = NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&d| (cube + d).board_cell().is_some())
            .count();
        histogram[n] += 1;
    }
    assert_eq!(histogram[3], 6);
    assert_eq!(histogram[4], 18);
    assert_eq!(histogram[6], 37);
}

proptest! {
    #[test]
    fn prop_round_trip((col, row) in arb_board_cell()) {
        let cube = HexCube::from_board_array(col, row);
        prop_assert_eq!(cube.to_board_array(), (col, row));
        prop_assert_eq!(cube.board_cell(), Some((col as u8, row as u8)));
    }

    #[test]
    fn prop_off_board_neighbors_are_valid_cubes((col, row) in arb_board_cell(), dir in 0usize..6) {
        let cube = HexCube::from_board_array(col, row) + NEIGHBOR_OFFSETS[dir];
        prop_assert_eq!(cube.x() + cube.y() + cube.z(), 0);
        let (c, r) = cube.to_board_array();
        prop_assert_eq!(cube.board_cell().is_some(), is_on_board(c, r));
    }

    #[test]
    fn prop_distance_identity(a in arb_cube()) {
        prop_assert_eq!(a.distance(a), 0);
    }

    #[test]
    fn prop_distance_zero_only_for_equal(a in arb_cube(), b in arb_cube()) {
        prop_assert_eq!(a.distance(b) == 0, a == b);
    }

    #[test]
    fn prop_distance_symmetric(a in arb_cube(), b in arb_cube()) {
        prop_assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn prop_triangle_inequality(a in arb_cube(), b in arb_cube(), c in arb_cube()) {
        prop_assert!(a.distance(b) + b.distance(c) >= a.distance(c));
    }

    #[test]
    fn prop_neighbors_at_distance_one(a in arb_cube()) {
        for n in a.neighbors() {
            prop_assert_eq!(a.distance(n), 1);
        }
    }
}
