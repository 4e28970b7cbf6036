//! Undo records and the bounded history stack owned by each position.

use std::fmt;

use crate::game_state::chess_rules::MAX_GAME_MOVES;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Everything `take_move` needs to reverse one `make_move` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub prev_en_passant_square: Option<Square>,
    pub prev_castling_rights: CastlingRights,
    pub prev_fifty_move_counter: u16,
    /// Hash of the position *before* `mv`; also the repetition log.
    pub prev_hash: u64,
}

impl UndoState {
    const EMPTY: UndoState = UndoState {
        mv: Move::NULL,
        prev_en_passant_square: None,
        prev_castling_rights: CASTLE_NONE,
        prev_fifty_move_counter: 0,
        prev_hash: 0,
    };
}

/// Fixed-capacity stack of undo records indexed by history ply.
#[derive(Clone)]
pub struct HistoryStack {
    entries: Box<[UndoState; MAX_GAME_MOVES]>,
    len: usize,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self {
            entries: Box::new([UndoState::EMPTY; MAX_GAME_MOVES]),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Overflowing the game-length ceiling is a programming error.
    #[inline]
    pub fn push(&mut self, record: UndoState) {
        assert!(
            self.len < MAX_GAME_MOVES,
            "history stack overflow: more than {MAX_GAME_MOVES} moves made"
        );
        self.entries[self.len] = record;
        self.len += 1;
    }

    #[inline]
    pub fn pop(&mut self) -> Option<UndoState> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.entries[self.len])
    }

    #[inline]
    pub fn as_slice(&self) -> &[UndoState] {
        &self.entries[..self.len]
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Only live entries take part in comparisons; popped slots keep stale data.
impl PartialEq for HistoryStack {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for HistoryStack {}

impl fmt::Debug for HistoryStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
