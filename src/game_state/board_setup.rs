//! External description of a position, independent of incremental state.
//!
//! A `BoardSetup` is what a parser or a caller hands over: piece placements
//! plus the side/rights/counter fields. `GameState::from_setup` validates it and
//! derives everything else.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::search::zobrist::en_passant_key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSetup {
    pub placements: Vec<(Square, Piece)>,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub fifty_move_counter: u16,
    pub fullmove_number: u16,
}

impl Default for BoardSetup {
    fn default() -> Self {
        Self {
            placements: Vec::new(),
            side_to_move: Color::White,
            castling_rights: CASTLE_NONE,
            en_passant_square: None,
            fifty_move_counter: 0,
            fullmove_number: 1,
        }
    }
}

// (right, king home, rook home, king color)
const CASTLING_HOMES: [(CastlingRights, Square, Square, Color); 4] = [
    (CASTLE_WHITE_KINGSIDE, 4, 7, Color::White),
    (CASTLE_WHITE_QUEENSIDE, 4, 0, Color::White),
    (CASTLE_BLACK_KINGSIDE, 60, 63, Color::Black),
    (CASTLE_BLACK_QUEENSIDE, 60, 56, Color::Black),
];

impl BoardSetup {
    pub fn with_piece(mut self, square: Square, piece: Piece) -> Self {
        self.placements.push((square, piece));
        self
    }

    /// Populate an empty `GameState` from this setup.
    pub(crate) fn apply_to(&self, game_state: &mut GameState) -> ChessResult<()> {
        for &(square, piece) in &self.placements {
            if square as usize >= NUM_SQUARES {
                return Err(ChessError::InvalidSquare(square.to_string()));
            }
            if game_state.piece_on(square).is_some() {
                return Err(ChessError::SquareOccupiedTwice(square));
            }
            if piece.kind == PieceKind::Pawn && (rank_of(square) == RANK_1 || rank_of(square) == RANK_8) {
                return Err(ChessError::PawnOnBackRank(square));
            }
            if piece.kind == PieceKind::King && game_state.king_square(piece.color).is_some() {
                return Err(ChessError::DuplicateKing(piece.color));
            }
            game_state.add_piece(piece, square);
        }

        if self.side_to_move == Color::Black {
            game_state.flip_side();
        }

        // Rights whose king or rook has left home can never be exercised.
        let mut rights = self.castling_rights & CASTLE_ALL;
        for (right, king_home, rook_home, color) in CASTLING_HOMES {
            let king_home_ok = game_state.is_piece_on_square(Piece::new(color, PieceKind::King), king_home);
            let rook_home_ok = game_state.is_piece_on_square(Piece::new(color, PieceKind::Rook), rook_home);
            if !(king_home_ok && rook_home_ok) {
                rights &= !right;
            }
        }
        game_state.set_castling_rights(rights);

        if let Some(ep_square) = self.en_passant_square {
            validate_en_passant(game_state, ep_square)?;
            game_state.en_passant_square = Some(ep_square);
            game_state.hash ^= en_passant_key(ep_square);
        }

        game_state.fifty_move_counter = self.fifty_move_counter;
        game_state.fullmove_number = self.fullmove_number;
        Ok(())
    }
}

/// The target must be empty, on the rank behind a pawn that just advanced two
/// squares, and that pawn must belong to the side not to move.
fn validate_en_passant(game_state: &GameState, ep_square: Square) -> ChessResult<()> {
    if ep_square as usize >= NUM_SQUARES {
        return Err(ChessError::InvalidSquare(ep_square.to_string()));
    }

    let (expected_rank, pushed_pawn_square) = match game_state.side_to_move() {
        Color::White => (5, ep_square.wrapping_sub(8)),
        Color::Black => (2, ep_square.wrapping_add(8)),
    };
    let pushed_pawn = Piece::new(game_state.side_to_move().opposite(), PieceKind::Pawn);

    if rank_of(ep_square) != expected_rank
        || game_state.piece_on(ep_square).is_some()
        || !game_state.is_piece_on_square(pushed_pawn, pushed_pawn_square)
    {
        return Err(ChessError::InvalidEnPassantSquare(ep_square));
    }
    Ok(())
}
