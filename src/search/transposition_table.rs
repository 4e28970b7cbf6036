//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Each slot remembers only the best move found for a position. There is no
//! depth, score or bound, and a store always overwrites whatever the slot held,
//! including an unrelated position that hashed to the same index. The full key
//! is kept so a probe never hands back a move recorded for another position.

use tracing::debug;

use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub best_move: Move,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    /// Stores that evicted an entry for a different key.
    pub overwrites: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    stats: TTStats,
}

impl TranspositionTable {
    /// Size the table to as many entries as fit in `bytes` (at least one).
    pub fn new_with_bytes(bytes: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>().max(1);
        let count = (bytes / entry_size).max(1);
        debug!(bytes, entries = count, "allocating transposition table");
        Self {
            entries: vec![None; count],
            stats: TTStats::default(),
        }
    }

    pub fn new_with_mb(size_mb: usize) -> Self {
        Self::new_with_bytes(size_mb.max(1) * 1024 * 1024)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TTStats::default();
    }

    /// Capacity in entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    pub fn probe(&mut self, key: u64) -> Option<Move> {
        self.stats.probes += 1;
        let idx = self.idx(key);
        let hit = self.entries[idx].filter(|entry| entry.key == key).map(|entry| entry.best_move);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub fn insert_or_refresh(&mut self, key: u64, best_move: Move) {
        self.stats.stores += 1;
        let idx = self.idx(key);
        if self.entries[idx].is_some_and(|existing| existing.key != key) {
            self.stats.overwrites += 1;
        }
        self.entries[idx] = Some(TTEntry { key, best_move });
    }
}
