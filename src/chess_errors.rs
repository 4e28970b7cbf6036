//! Recoverable errors raised at the crate boundary.
//!
//! `ChessError` covers malformed input: FEN text, board setups handed to
//! [`GameState::from_setup`](crate::game_state::game_state::GameState::from_setup),
//! and move text typed by a user. Internal consistency failures (a piece
//! mismatch on removal, taking back a move with an empty history, bitboards
//! disagreeing with the square index) are *not* represented here; those
//! abort through `assert!`/`panic!` because continuing would silently corrupt
//! search results.
//!
//! An illegal move during search is not an error either: `make_move` reports
//! it through its boolean return and the search simply tries the next move.

use crate::game_state::chess_types::{Color, Square};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// A required whitespace-separated FEN field was absent.
    #[error("FEN is missing the {0} field")]
    MissingFenField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFenFields,

    /// The placement field did not contain exactly eight ranks.
    #[error("board layout must contain 8 ranks, found {0}")]
    WrongRankCount(usize),

    /// Payload: rank as printed in the FEN, 8 down to 1.
    #[error("rank {0} of the board layout does not sum to 8 files")]
    BadRankWidth(u8),

    #[error("invalid piece character '{0}' in board layout")]
    InvalidPieceChar(char),

    #[error("invalid side-to-move field: {0}")]
    InvalidSideToMove(String),

    #[error("invalid castling rights character: {0}")]
    InvalidCastlingChar(char),

    #[error("invalid algebraic square: {0}")]
    InvalidSquare(String),

    #[error("invalid move counter: {0}")]
    InvalidCounter(String),

    /// Two placements in a board setup named the same square.
    #[error("square {0} is occupied more than once in the board setup")]
    SquareOccupiedTwice(Square),

    #[error("pawn placed on back rank square {0}")]
    PawnOnBackRank(Square),

    #[error("{0:?} has more than one king in the board setup")]
    DuplicateKing(Color),

    /// An en-passant target must sit on rank 3 (black to move) or rank 6
    /// (white to move).
    #[error("en-passant square {0} does not fit the side to move")]
    InvalidEnPassantSquare(Square),

    #[error("move text '{0}' is not well formed")]
    InvalidMoveText(String),

    #[error("move '{0}' is not legal in this position")]
    IllegalMove(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
