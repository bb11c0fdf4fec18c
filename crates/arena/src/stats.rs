//! Aggregates over a batch of game records.

use abalone_core::Side;
use serde::Serialize;

use crate::runner::GameRecord;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SideSummary {
    pub agent: String,
    pub wins: usize,
    pub avg_ms_per_move: f64,
    pub avg_lost_marbles: f64,
}

/// Averages over games played by the same pair of agents.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FaceOffSummary {
    pub games: usize,
    /// Games stopped by the turn cap
    pub unfinished: usize,
    pub avg_moves_per_game: f64,
    pub black: SideSummary,
    pub white: SideSummary,
}

fn side_summary(records: &[GameRecord], side: Side) -> SideSummary {
    let games = records.len() as f64;
    let moves: usize = records.iter().map(|r| r.moves_of(side)).sum();
    let time: f64 = records.iter().map(|r| r.time_of(side)).sum();
    let lost: u32 = records
        .iter()
        .map(|r| u32::from(r.final_score.lost(side)))
        .sum();
    let agent = match side {
        Side::Black => &records[0].black,
        Side::White => &records[0].white,
    };

    SideSummary {
        agent: agent.clone(),
        wins: records.iter().filter(|r| r.winner == Some(side)).count(),
        avg_ms_per_move: if moves == 0 {
            0.0
        } else {
            time / moves as f64
        },
        avg_lost_marbles: f64::from(lost) / games,
    }
}

/// Summarize `records`; `None` when there are none.
pub fn summarize(records: &[GameRecord]) -> Option<FaceOffSummary> {
    if records.is_empty() {
        return None;
    }
    let total_moves: usize = records.iter().map(|r| r.moves.len()).sum();
    Some(FaceOffSummary {
        games: records.len(),
        unfinished: records.iter().filter(|r| r.winner.is_none()).count(),
        avg_moves_per_game: total_moves as f64 / records.len() as f64,
        black: side_summary(records, Side::Black),
        white: side_summary(records, Side::White),
    })
}
