//! Core incremental board state representation.
//!
//! `GameState` is the central model for the engine. Besides the piece
//! bitboards it keeps a square index, the Zobrist hash, material totals, pawn
//! tables and king squares, all maintained incrementally by the placement
//! primitives in `piece_placement.rs` and by `make_move` / `take_move`.
//! Derived state is private so it can only change through those paths.

use crate::chess_errors::ChessResult;
use crate::game_state::board_setup::BoardSetup;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::{HistoryStack, UndoState};
use crate::moves::occupancy_masks::pawn_mask;
use crate::search::zobrist::{castling_key, compute_zobrist_key, side_to_move_key};
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub(crate) pieces: [[u64; 6]; 2],
    pub(crate) occupancy_by_color: [u64; 2],
    pub(crate) occupancy_all: u64,

    // --- Square index ---
    pub(crate) board: [Option<Piece>; NUM_SQUARES],

    // --- Incrementally maintained evaluation inputs ---
    pub(crate) hash: u64,
    pub(crate) material: [i32; 2],
    pub(crate) pawns_on_file: [[u8; 8]; 2],
    pub(crate) pawns_on_rank: [[u8; 8]; 2],
    pub(crate) pawn_control: [[u8; NUM_SQUARES]; 2],
    pub(crate) king_squares: [Option<Square>; 2],

    // --- Side and state flags ---
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub(crate) fifty_move_counter: u16,
    pub(crate) fullmove_number: u16,
    pub(crate) ply: u16,

    // --- Make/unmake stack, also the repetition log ---
    pub(crate) history: HistoryStack,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            board: [None; NUM_SQUARES],

            hash: castling_key(CASTLE_NONE),
            material: [0; 2],
            pawns_on_file: [[0; 8]; 2],
            pawns_on_rank: [[0; 8]; 2],
            pawn_control: [[0; NUM_SQUARES]; 2],
            king_squares: [None; 2],

            side_to_move: Color::White,
            castling_rights: CASTLE_NONE,
            en_passant_square: None,

            fifty_move_counter: 0,
            fullmove_number: 1,
            ply: 0,

            history: HistoryStack::new(),
        }
    }
}

impl GameState {
    /// Empty board, white to move, no rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        match Self::from_fen(STARTING_POSITION_FEN) {
            Ok(game_state) => game_state,
            Err(err) => panic!("starting FEN must always parse: {err}"),
        }
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let setup = parse_fen(fen)?;
        Self::from_setup(&setup)
    }

    /// Build a position from an externally parsed setup, deriving every
    /// incremental field through the placement primitives.
    pub fn from_setup(setup: &BoardSetup) -> ChessResult<Self> {
        let mut game_state = Self::new_empty();
        setup.apply_to(&mut game_state)?;
        game_state.debug_validate();
        Ok(game_state)
    }

    // --- Queries ---

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.board[square as usize]
    }

    #[inline]
    pub fn is_piece_on_square(&self, piece: Piece, square: Square) -> bool {
        self.board[square as usize] == Some(piece)
    }

    #[inline]
    pub fn squares(&self) -> &[Option<Piece>; NUM_SQUARES] {
        &self.board
    }

    #[inline]
    pub fn bitboard(&self, piece: Piece) -> u64 {
        self.pieces[piece.color.index()][piece.kind.index()]
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self) -> u64 {
        self.occupancy_all
    }

    #[inline]
    pub fn occupancy_of(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn material(&self, color: Color) -> i32 {
        self.material[color.index()]
    }

    #[inline]
    pub fn pawns_on_file(&self, color: Color, file: u8) -> u8 {
        self.pawns_on_file[color.index()][file as usize]
    }

    #[inline]
    pub fn pawns_on_rank(&self, color: Color, rank: u8) -> u8 {
        self.pawns_on_rank[color.index()][rank as usize]
    }

    /// Number of `color` pawns that could capture onto `square`.
    #[inline]
    pub fn pawn_control(&self, color: Color, square: Square) -> u8 {
        self.pawn_control[color.index()][square as usize]
    }

    #[inline]
    pub fn is_pawn_controlling_square(&self, color: Color, square: Square) -> bool {
        self.pawn_control(color, square) > 0
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn fifty_move_counter(&self) -> u16 {
        self.fifty_move_counter
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Moves made since the search root.
    #[inline]
    pub fn ply(&self) -> u16 {
        self.ply
    }

    #[inline]
    pub fn set_ply(&mut self, ply: u16) {
        self.ply = ply;
    }

    /// Moves made since the position was set up.
    #[inline]
    pub fn history_ply(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn history(&self) -> &[UndoState] {
        self.history.as_slice()
    }

    // --- State flag mutation (hash-aware) ---

    /// Hand the move to the other side, keeping the hash in step.
    pub fn flip_side(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
        self.hash ^= side_to_move_key();
    }

    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.hash ^= castling_key(self.castling_rights);
        self.castling_rights = rights & CASTLE_ALL;
        self.hash ^= castling_key(self.castling_rights);
    }

    /// True if the current hash appeared earlier in the history since the last
    /// irreversible move. One prior occurrence is enough to call it a draw.
    pub fn is_repetition(&self) -> bool {
        let history_ply = self.history.len();
        let start = history_ply.saturating_sub(self.fifty_move_counter as usize);
        // The entry at history_ply - 1 is the position with the other side to
        // move, so it can never match.
        let end = history_ply.saturating_sub(1);

        self.history
            .as_slice()
            .get(start..end)
            .is_some_and(|window| window.iter().any(|undo| undo.prev_hash == self.hash))
    }

    // --- Invariant checks ---

    /// Recompute every derived field from scratch and compare.
    pub fn validate(&self) -> Result<(), String> {
        let mut union = 0u64;
        for color in ALL_COLORS {
            let mut color_union = 0u64;
            for kind in ALL_PIECE_KINDS {
                let bb = self.pieces[color.index()][kind.index()];
                if union & bb != 0 {
                    return Err(format!("{color:?} {kind:?} bitboard overlaps another piece"));
                }
                union |= bb;
                color_union |= bb;
            }
            if color_union != self.occupancy_by_color[color.index()] {
                return Err(format!("{color:?} occupancy does not match its piece bitboards"));
            }
        }
        if union != self.occupancy_all {
            return Err("combined occupancy is not the union of the piece bitboards".to_owned());
        }

        let mut material = [0i32; 2];
        let mut pawns_on_file = [[0u8; 8]; 2];
        let mut pawns_on_rank = [[0u8; 8]; 2];
        let mut pawn_control = [[0u8; NUM_SQUARES]; 2];
        let mut king_squares = [None; 2];

        for square in 0..NUM_SQUARES as Square {
            let mask = square_mask(square);
            match self.board[square as usize] {
                Some(piece) => {
                    if self.bitboard(piece) & mask == 0 {
                        return Err(format!("index holds {piece:?} on {square} but its bitboard does not"));
                    }
                    let c = piece.color.index();
                    material[c] += piece.value();
                    match piece.kind {
                        PieceKind::Pawn => {
                            pawns_on_file[c][file_of(square) as usize] += 1;
                            pawns_on_rank[c][rank_of(square) as usize] += 1;
                            let mut controlled = pawn_mask(piece.color, square);
                            while controlled != 0 {
                                pawn_control[c][controlled.trailing_zeros() as usize] += 1;
                                controlled &= controlled - 1;
                            }
                        }
                        PieceKind::King => king_squares[c] = Some(square),
                        _ => {}
                    }
                }
                None => {
                    if self.occupancy_all & mask != 0 {
                        return Err(format!("square {square} is occupied but the index is empty"));
                    }
                }
            }
        }

        if material != self.material {
            return Err(format!(
                "material {:?} does not match recomputed {material:?}",
                self.material
            ));
        }
        if pawns_on_file != self.pawns_on_file || pawns_on_rank != self.pawns_on_rank {
            return Err("pawn file/rank counts do not match the board".to_owned());
        }
        if pawn_control != self.pawn_control {
            return Err("pawn control table does not match the board".to_owned());
        }
        if king_squares != self.king_squares {
            return Err(format!(
                "king squares {:?} do not match the board {king_squares:?}",
                self.king_squares
            ));
        }

        let recomputed = compute_zobrist_key(self);
        if recomputed != self.hash {
            return Err(format!(
                "incremental hash {:#018x} differs from recomputed {recomputed:#018x}",
                self.hash
            ));
        }

        Ok(())
    }

    /// Debug builds abort on the first invariant violation.
    #[inline]
    pub(crate) fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        if let Err(violation) = self.validate() {
            panic!("position invariant violated: {violation}");
        }
    }
}
