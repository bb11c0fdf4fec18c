//! Zobrist hashing and the transposition table.
//!
//! Keys are 64-bit XOR sums of one random value per (side, cell) pair plus a
//! token for the side to move. Two different positions can share a key; such
//! collisions are rare enough at 64 bits that the table does not verify
//! entries against the full position.

use std::collections::HashMap;

use abalone_core::{Game, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Random keys for incremental position hashing.
#[derive(Clone, Debug)]
pub struct ZobristKeys {
    /// One key per cell, indexed by `Side::index()`
    pieces: [Vec<u64>; 2],
    /// XORed in when White is to move
    white_to_move: u64,
    scratch: Vec<(Side, usize)>,
}

impl ZobristKeys {
    /// Generate keys for a board with `num_cells` cells.
    pub fn new(num_cells: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let black: Vec<u64> = (0..num_cells).map(|_| rng.gen()).collect();
        let white: Vec<u64> = (0..num_cells).map(|_| rng.gen()).collect();
        Self {
            pieces: [black, white],
            white_to_move: rng.gen(),
            scratch: Vec::with_capacity(32),
        }
    }

    /// Key of a piece of `side` on `cell`
    #[inline]
    pub fn piece(&self, side: Side, cell: usize) -> u64 {
        self.pieces[side.index()][cell]
    }

    /// Full key of a state, computed from scratch.
    pub fn key<G: Game>(&mut self, game: &G, state: &G::State) -> u64 {
        self.scratch.clear();
        game.occupied_cells(state, &mut self.scratch);

        let mut key = 0;
        for &(side, cell) in &self.scratch {
            key ^= self.piece(side, cell);
        }
        if game.side_to_move(state) == Side::White {
            key ^= self.white_to_move;
        }
        key
    }

    /// Flip the side-to-move token of `key`.
    #[inline]
    pub fn toggle(&self, key: u64) -> u64 {
        key ^ self.white_to_move
    }

    /// Update `key` for a piece moving between cells; `to == None` removes it.
    #[inline]
    pub fn move_piece(&self, key: u64, side: Side, from: usize, to: Option<usize>) -> u64 {
        let key = key ^ self.piece(side, from);
        match to {
            Some(to) => key ^ self.piece(side, to),
            None => key,
        }
    }
}

/// Relation of a stored value to the true minimax value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bound {
    /// The value is exact
    Exact,
    /// The true value is at least the stored one (search failed high)
    Lower,
    /// The true value is at most the stored one (search failed low)
    Upper,
}

impl Bound {
    /// Classify a value returned from a search of window `(alpha, beta)`.
    pub fn classify(value: f32, alpha: f32, beta: f32) -> Self {
        if value <= alpha {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }
}

/// One stored search result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TtEntry<A> {
    pub value: f32,
    pub best: Option<A>,
    /// Remaining depth the value was searched to
    pub depth: u32,
    pub bound: Bound,
}

/// Which entry survives when two searches store under the same key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementPolicy {
    /// Replace only with a result searched at least as deep
    #[default]
    KeepDeepest,
    /// Newest result wins
    AlwaysReplace,
}

/// Table counters since the last `clear`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    /// Stores rejected by the replacement policy
    pub skipped: u64,
    pub exact: u64,
    pub lower: u64,
    pub upper: u64,
}

/// Transposition table keyed by Zobrist hash.
#[derive(Clone, Debug)]
pub struct TranspositionTable<A> {
    entries: HashMap<u64, TtEntry<A>>,
    policy: ReplacementPolicy,
    stats: TtStats,
}

impl<A: Copy> TranspositionTable<A> {
    pub fn new(policy: ReplacementPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
            stats: TtStats::default(),
        }
    }

    /// Look up `key`, returning the entry only if it was searched to at least
    /// `required_depth`.
    pub fn get(&mut self, key: u64, required_depth: u32) -> Option<TtEntry<A>> {
        self.stats.probes += 1;
        let entry = self
            .entries
            .get(&key)
            .filter(|entry| entry.depth >= required_depth)
            .copied();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    /// Store `entry` under `key`, subject to the replacement policy.
    pub fn put(&mut self, key: u64, entry: TtEntry<A>) {
        if let (ReplacementPolicy::KeepDeepest, Some(old)) =
            (self.policy, self.entries.get(&key))
        {
            if entry.depth < old.depth {
                self.stats.skipped += 1;
                return;
            }
        }

        self.stats.stores += 1;
        match entry.bound {
            Bound::Exact => self.stats.exact += 1,
            Bound::Lower => self.stats.lower += 1,
            Bound::Upper => self.stats.upper += 1,
        }
        self.entries.insert(key, entry);
    }

    /// Remove every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = TtStats::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> TtStats {
        self.stats
    }

    pub fn policy(&self) -> ReplacementPolicy {
        self.policy
    }
}
