//! Core value types shared by the position, move generation and search.
//!
//! Squares use the little-endian rank-file mapping (a1 = 0, h1 = 7,
//! a8 = 56, h8 = 63). Ray arithmetic elsewhere in the crate (±1, ±7, ±8, ±9)
//! depends on this exact layout.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

pub const ALL_COLORS: [Color; 2] = [Color::White, Color::Black];

/// Piece kind (color is carried separately so bitboards index as `[color][kind]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PieceKind::Pawn),
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            5 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Fixed material value used for the incremental material totals.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20_000,
        }
    }

    #[inline]
    pub const fn label(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// One of the twelve colored pieces. "No piece" is spelled `Option::<Piece>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Dense `0..12` index: white pieces first, then black.
    #[inline]
    pub const fn index(self) -> usize {
        self.color.index() * 6 + self.kind.index()
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        let color = if index < 6 { Color::White } else { Color::Black };
        match PieceKind::from_index(index % 6) {
            Some(kind) if index < 12 => Some(Self { color, kind }),
            _ => None,
        }
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.kind.value()
    }

    /// FEN-style label: uppercase for white, lowercase for black.
    #[inline]
    pub fn label(self) -> char {
        match self.color {
            Color::White => self.kind.label().to_ascii_uppercase(),
            Color::Black => self.kind.label(),
        }
    }
}

pub const NUM_PIECES: usize = 12;

/// Castling rights bitmask.
pub type CastlingRights = u8;

pub const CASTLE_NONE: CastlingRights = 0;
pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0x0F;

/// Board square index (`0..=63`).
pub type Square = u8;

pub const NUM_SQUARES: usize = 64;

pub const FILE_A: u8 = 0;
pub const FILE_H: u8 = 7;
pub const RANK_1: u8 = 0;
pub const RANK_8: u8 = 7;

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square >> 3
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn square_at(rank: u8, file: u8) -> Square {
    (rank << 3) + file
}

#[inline]
pub const fn square_mask(square: Square) -> u64 {
    1u64 << square
}
