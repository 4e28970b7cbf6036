//! Packed move record.
//!
//! A move is a single `u32` holding the origin and destination squares, the
//! captured and promoted pieces (or "none"), and the special-move flags.
//! Equality is plain integer equality, so it is structural over every field.

use std::fmt;

use crate::game_state::chess_types::{file_of, rank_of, Piece, Square};

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const CAPTURED_SHIFT: u32 = 12;
const PROMOTED_SHIFT: u32 = 16;
const FLAGS_SHIFT: u32 = 20;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0xF;
pub const NO_PIECE_CODE: u32 = 0xF;

pub const FLAG_CAPTURE: u32 = 1 << 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u32 = 1 << 1;
pub const FLAG_EN_PASSANT: u32 = 1 << 2;
pub const FLAG_CASTLING: u32 = 1 << 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// a1a1 with no pieces or flags; fills unused history slots and is never
    /// produced by move generation.
    pub const NULL: Move = Move((NO_PIECE_CODE << CAPTURED_SHIFT) | (NO_PIECE_CODE << PROMOTED_SHIFT));

    #[inline]
    pub fn new(
        from: Square,
        to: Square,
        captured: Option<Piece>,
        promoted: Option<Piece>,
        flags: u32,
    ) -> Self {
        debug_assert!(from < 64 && to < 64);
        let mut bits = 0u32;
        bits |= (from as u32) << FROM_SHIFT;
        bits |= (to as u32) << TO_SHIFT;
        bits |= piece_to_code(captured) << CAPTURED_SHIFT;
        bits |= piece_to_code(promoted) << PROMOTED_SHIFT;
        bits |= (flags & 0xF) << FLAGS_SHIFT;
        Self(bits)
    }

    /// Quiet move with no capture, promotion or flags.
    #[inline]
    pub fn quiet(from: Square, to: Square) -> Self {
        Self::new(from, to, None, None, 0)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        Piece::from_index(((self.0 >> CAPTURED_SHIFT) & PIECE_MASK) as usize)
    }

    #[inline]
    pub const fn promoted(self) -> Option<Piece> {
        Piece::from_index(((self.0 >> PROMOTED_SHIFT) & PIECE_MASK) as usize)
    }

    #[inline]
    pub const fn flags(self) -> u32 {
        (self.0 >> FLAGS_SHIFT) & 0xF
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.flags() & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_double_pawn_push(self) -> bool {
        self.flags() & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flags() & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flags() & FLAG_CASTLING != 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        ((self.0 >> PROMOTED_SHIFT) & PIECE_MASK) != NO_PIECE_CODE
    }

    /// Neither a capture nor a promotion; used by killer/history ordering.
    #[inline]
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }
}

#[inline]
fn piece_to_code(piece: Option<Piece>) -> u32 {
    piece.map_or(NO_PIECE_CODE, |p| p.index() as u32)
}

/// Long algebraic coordinates, e.g. `e2e4`, `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for square in [self.from(), self.to()] {
            let file = char::from(b'a' + file_of(square));
            let rank = char::from(b'1' + rank_of(square));
            write!(f, "{file}{rank}")?;
        }
        if let Some(promoted) = self.promoted() {
            write!(f, "{}", promoted.kind.label())?;
        }
        Ok(())
    }
}
