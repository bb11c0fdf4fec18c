//! Property-based tests for the Abalone rules.
//!
//! Positions are generated by random play from the opening layouts, so only
//! reachable positions are tested.

use abalone_board::{Abalone, Cell, Layout, Move, Position};
use abalone_core::{Game, Side};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies for generating random positions
// =============================================================================

fn arb_layout() -> impl Strategy<Value = Layout> {
    prop_oneof![Just(Layout::Standard), Just(Layout::GermanDaisy)]
}

/// Play up to `plies` random moves from a layout, returning every position
/// along the way.
fn random_game(layout: Layout, seed: u64, plies: usize) -> Vec<Position> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pos = Position::from_layout(layout);
    let mut history = vec![pos];
    for _ in 0..plies {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            break;
        }
        pos = pos.make_move(moves[rng.gen_range(0..moves.len())]);
        history.push(pos);
    }
    history
}

fn arb_game() -> impl Strategy<Value = Vec<Position>> {
    (arb_layout(), any::<u64>(), 0usize..120)
        .prop_map(|(layout, seed, plies)| random_game(layout, seed, plies))
}

fn arb_position() -> impl Strategy<Value = Position> {
    arb_game().prop_map(|history| history[history.len() - 1])
}

// =============================================================================
// Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Remaining marbles never increase along a game
    #[test]
    fn prop_score_monotone(history in arb_game()) {
        for pair in history.windows(2) {
            let (before, after) = (pair[0].score(), pair[1].score());
            prop_assert!(after.black() <= before.black());
            prop_assert!(after.white() <= before.white());
            // At most one marble falls per move
            prop_assert!(
                (before.black() - after.black()) + (before.white() - after.white()) <= 1
            );
        }
    }

    /// The stored score always matches the marbles on the board
    #[test]
    fn prop_score_matches_board(pos in arb_position()) {
        prop_assert_eq!(pos.marbles(Side::Black).popcount() as u8, pos.score().black());
        prop_assert_eq!(pos.marbles(Side::White).popcount() as u8, pos.score().white());
        prop_assert!((pos.marbles(Side::Black) & pos.marbles(Side::White)).is_empty());
    }

    /// Only the opponent of the mover can lose a marble
    #[test]
    fn prop_mover_never_loses_marbles(pos in arb_position()) {
        let us = pos.side_to_move();
        for mv in pos.legal_moves() {
            let next = pos.make_move(mv);
            prop_assert_eq!(next.score().remaining(us), pos.score().remaining(us));
            prop_assert_eq!(next.side_to_move(), us.opposite());
        }
    }

    /// Every generated move passes the legality check, without duplicates
    #[test]
    fn prop_generated_moves_are_legal(pos in arb_position()) {
        let moves = pos.legal_moves();
        let unique: std::collections::HashSet<Move> = moves.iter().copied().collect();
        prop_assert_eq!(unique.len(), moves.len());
        for mv in moves {
            prop_assert!(pos.is_legal(mv));
            prop_assert!(pos.try_make_move(mv).is_ok());
        }
    }

    /// A non-terminal position always offers a move
    #[test]
    fn prop_non_terminal_has_moves(pos in arb_position()) {
        prop_assert_eq!(pos.legal_moves().is_empty(), pos.is_terminal());
    }

    /// Textual round trip through the row format
    #[test]
    fn prop_rows_round_trip(pos in arb_position()) {
        let rows: Vec<String> = (0..9u8)
            .map(|row| {
                (0..abalone_core::hex::ROW_WIDTHS[row as usize])
                    .map(|col| {
                        Cell::from_coords(col, row)
                            .and_then(|c| pos.marble_at(c))
                            .map_or('.', Side::to_char)
                    })
                    .collect()
            })
            .collect();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let parsed = Position::from_rows(&refs, pos.side_to_move()).unwrap();
        prop_assert_eq!(parsed, pos);
    }

    /// The Game impl reports every marble exactly once
    #[test]
    fn prop_occupied_cells(pos in arb_position()) {
        let game = Abalone::default();
        let mut cells = Vec::new();
        game.occupied_cells(&pos, &mut cells);
        let expected = pos.score().black() as usize + pos.score().white() as usize;
        prop_assert_eq!(cells.len(), expected);
    }
}
