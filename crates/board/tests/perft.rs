//! Perft (Performance Test) for validating move generation correctness.
//!
//! Perft counts the number of leaf nodes at a given depth, which must match
//! reference values to verify move generation and move application.

use abalone_board::{Cell, Direction, Layout, Move, Position};
use abalone_core::{Score, Side};

/// Count all leaf nodes at a given depth
fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = pos.legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        let new_pos = pos.make_move(mv);
        nodes += perft(&new_pos, depth - 1);
    }
    nodes
}

fn cell(s: &str) -> Cell {
    Cell::from_notation(s).unwrap()
}

// =============================================================================
// Starting Position Tests
// =============================================================================

#[test]
fn test_perft_standard_depth_1() {
    let pos = Position::starting();
    assert_eq!(perft(&pos, 1), 44);
}

#[test]
fn test_perft_standard_depth_2() {
    let pos = Position::starting();
    assert_eq!(perft(&pos, 2), 1936);
}

#[test]
fn test_perft_standard_depth_3() {
    let pos = Position::starting();
    assert_eq!(perft(&pos, 3), 98_912);
}

#[test]
fn test_standard_white_moves() {
    let pos = Position::starting().with_side_to_move(Side::White);
    assert_eq!(pos.legal_moves().len(), 44);
}

#[test]
fn test_perft_german_daisy() {
    let pos = Position::from_layout(Layout::GermanDaisy);
    assert_eq!(perft(&pos, 1), 80);
    assert_eq!(perft(&pos, 2), 6244);

    let white = pos.with_side_to_move(Side::White);
    assert_eq!(perft(&white, 1), 80);
}

// =============================================================================
// Pushing ("sumito")
// =============================================================================

/// Black row of two against a lone white marble on the West rim of row E.
fn push_off_position() -> Position {
    let rows = [
        "WWWWW", "WWW...", ".......", "........", "WBB......", "........", ".......",
        "BBBBBB", "BBBBB",
    ];
    Position::from_rows(&rows, Side::Black).unwrap()
}

#[test]
fn test_push_off_the_board() {
    let pos = push_off_position();
    assert_eq!(pos.score(), Score::new(13, 9).unwrap());

    let push = Move::inline(cell("E3"), Direction::West);
    assert!(pos.is_legal(push));

    let next = pos.make_move(push);
    assert_eq!(next.score(), Score::new(13, 8).unwrap());
    assert!(next.is_terminal());
    assert_eq!(next.winner(), Some(Side::Black));
    assert_eq!(next.marble_at(cell("E1")), Some(Side::Black));
    assert_eq!(next.marble_at(cell("E2")), Some(Side::Black));
    assert_eq!(next.marble_at(cell("E3")), None);
    assert!(next.legal_moves().is_empty());
}

#[test]
fn test_only_one_capture_available() {
    let pos = push_off_position();
    let moves = pos.legal_moves();
    assert_eq!(moves.len(), 55);

    let captures: Vec<_> = moves
        .iter()
        .filter(|&&mv| pos.make_move(mv).score().white() == 8)
        .collect();
    assert_eq!(captures, vec![&Move::inline(cell("E3"), Direction::West)]);
}

#[test]
fn test_push_into_empty_cell() {
    let rows = [
        ".....", "......", ".......", "........", "..WBB....", "........", ".......",
        "......", ".....",
    ];
    let pos = Position::from_rows(&rows, Side::Black).unwrap();
    let push = Move::inline(cell("E5"), Direction::West);
    assert!(pos.is_legal(push));

    let next = pos.make_move(push);
    assert_eq!(next.marble_at(cell("E2")), Some(Side::White));
    assert_eq!(next.marble_at(cell("E3")), Some(Side::Black));
    assert_eq!(next.marble_at(cell("E4")), Some(Side::Black));
    assert_eq!(next.marble_at(cell("E5")), None);
    assert_eq!(next.score(), pos.score());
}

#[test]
fn test_push_needs_superiority() {
    // Two against two is a stalemate
    let rows = [
        ".....", "......", ".......", "........", ".WWBB....", "........", ".......",
        "......", ".....",
    ];
    let pos = Position::from_rows(&rows, Side::Black).unwrap();
    assert!(!pos.is_legal(Move::inline(cell("E5"), Direction::West)));
}

#[test]
fn test_push_blocked_by_own_marble() {
    // B W B B: the white marble has a black marble behind it
    let rows = [
        ".....", "......", ".......", "........", ".BWBB....", "........", ".......",
        "......", ".....",
    ];
    let pos = Position::from_rows(&rows, Side::Black).unwrap();
    assert!(!pos.is_legal(Move::inline(cell("E5"), Direction::West)));
}

#[test]
fn test_cannot_push_own_marble_off() {
    let rows = [
        ".....", "......", ".......", "........", "BB.......", "........", ".......",
        "......", ".....",
    ];
    let pos = Position::from_rows(&rows, Side::Black).unwrap();
    assert!(!pos.is_legal(Move::inline(cell("E2"), Direction::West)));
    assert!(pos.is_legal(Move::inline(cell("E1"), Direction::East)));
}

#[test]
fn test_three_push_two() {
    let rows = [
        ".....", "......", ".......", "........", "WWBBB....", "........", ".......",
        "......", ".....",
    ];
    let pos = Position::from_rows(&rows, Side::Black).unwrap();
    let push = Move::inline(cell("E5"), Direction::West);
    assert!(pos.is_legal(push));

    let next = pos.make_move(push);
    assert_eq!(next.score().white(), 1);
    assert_eq!(next.marble_at(cell("E1")), Some(Side::White));
    assert_eq!(next.marbles(Side::Black).popcount(), 3);
}
