//! Board mutation primitives.
//!
//! Every change to piece placement goes through `add_piece`, `remove_piece` or
//! `move_piece`, which keep the bitboards, square index, hash, material, pawn
//! tables and king squares in lock step.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::occupancy_masks::pawn_mask;
use crate::search::zobrist::piece_square_key;

impl GameState {
    /// Place `piece` on an empty square.
    pub fn add_piece(&mut self, piece: Piece, square: Square) {
        assert!((square as usize) < NUM_SQUARES, "add_piece: square {square} is off the board");
        assert!(
            self.board[square as usize].is_none(),
            "add_piece: square {square} already holds {:?}",
            self.board[square as usize]
        );

        let c = piece.color.index();
        let mask = square_mask(square);
        self.board[square as usize] = Some(piece);
        self.pieces[c][piece.kind.index()] |= mask;
        self.occupancy_by_color[c] |= mask;
        self.occupancy_all |= mask;

        self.hash ^= piece_square_key(piece, square);
        self.material[c] += piece.value();
        self.piece_arrived(piece, square);
    }

    /// Remove `piece` from `square`. The square must hold exactly that piece.
    pub fn remove_piece(&mut self, piece: Piece, square: Square) {
        assert!(
            self.board[square as usize] == Some(piece),
            "remove_piece: expected {piece:?} on {square}, found {:?}",
            self.board[square as usize]
        );

        let c = piece.color.index();
        let mask = !square_mask(square);
        self.board[square as usize] = None;
        self.pieces[c][piece.kind.index()] &= mask;
        self.occupancy_by_color[c] &= mask;
        self.occupancy_all &= mask;

        self.hash ^= piece_square_key(piece, square);
        self.material[c] -= piece.value();
        self.piece_left(piece, square);
    }

    /// Relocate whatever stands on `from` to the empty square `to`.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        let Some(piece) = self.board[from as usize] else {
            panic!("move_piece: no piece on {from}");
        };
        assert!(
            self.board[to as usize].is_none(),
            "move_piece: destination {to} already holds {:?}",
            self.board[to as usize]
        );

        let c = piece.color.index();
        let toggle = square_mask(from) | square_mask(to);
        self.board[from as usize] = None;
        self.board[to as usize] = Some(piece);
        self.pieces[c][piece.kind.index()] ^= toggle;
        self.occupancy_by_color[c] ^= toggle;
        self.occupancy_all ^= toggle;

        self.hash ^= piece_square_key(piece, from) ^ piece_square_key(piece, to);
        self.piece_left(piece, from);
        self.piece_arrived(piece, to);
    }

    fn piece_arrived(&mut self, piece: Piece, square: Square) {
        match piece.kind {
            PieceKind::Pawn => self.update_pawn_tables(piece.color, square, true),
            PieceKind::King => self.king_squares[piece.color.index()] = Some(square),
            _ => {}
        }
    }

    fn piece_left(&mut self, piece: Piece, square: Square) {
        match piece.kind {
            PieceKind::Pawn => self.update_pawn_tables(piece.color, square, false),
            PieceKind::King => self.king_squares[piece.color.index()] = None,
            _ => {}
        }
    }

    fn update_pawn_tables(&mut self, color: Color, square: Square, arriving: bool) {
        let c = color.index();
        let bump = |count: &mut u8| {
            if arriving {
                *count += 1;
            } else {
                *count -= 1;
            }
        };

        bump(&mut self.pawns_on_file[c][file_of(square) as usize]);
        bump(&mut self.pawns_on_rank[c][rank_of(square) as usize]);

        let mut controlled = pawn_mask(color, square);
        while controlled != 0 {
            bump(&mut self.pawn_control[c][controlled.trailing_zeros() as usize]);
            controlled &= controlled - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE_PAWN: Piece = Piece::new(Color::White, PieceKind::Pawn);
    const WHITE_KING: Piece = Piece::new(Color::White, PieceKind::King);
    const BLACK_KNIGHT: Piece = Piece::new(Color::Black, PieceKind::Knight);

    #[test]
    fn add_then_remove_restores_empty_board() {
        let mut game = GameState::new_empty();
        let empty = game.clone();

        game.add_piece(WHITE_PAWN, 12);
        assert_eq!(game.piece_on(12), Some(WHITE_PAWN));
        assert_eq!(game.material(Color::White), 100);
        assert_eq!(game.pawns_on_file(Color::White, 4), 1);
        assert!(game.is_pawn_controlling_square(Color::White, 19));
        assert!(game.is_pawn_controlling_square(Color::White, 21));
        assert_eq!(game.validate(), Ok(()));

        game.remove_piece(WHITE_PAWN, 12);
        assert_eq!(game, empty);
    }

    #[test]
    fn move_piece_tracks_king_square() {
        let mut game = GameState::new_empty();
        game.add_piece(WHITE_KING, 4);
        game.move_piece(4, 5);
        assert_eq!(game.king_square(Color::White), Some(5));
        assert_eq!(game.validate(), Ok(()));
    }

    #[test]
    fn edge_pawn_controls_one_square() {
        let mut game = GameState::new_empty();
        game.add_piece(WHITE_PAWN, 8);
        assert_eq!(game.pawn_control(Color::White, 17), 1);
        assert_eq!(game.pawn_control(Color::White, 15), 0);
        assert_eq!(game.validate(), Ok(()));
    }

    #[test]
    #[should_panic(expected = "already holds")]
    fn adding_onto_an_occupied_square_panics() {
        let mut game = GameState::new_empty();
        game.add_piece(WHITE_PAWN, 12);
        game.add_piece(BLACK_KNIGHT, 12);
    }

    #[test]
    #[should_panic(expected = "remove_piece")]
    fn removing_the_wrong_piece_panics() {
        let mut game = GameState::new_empty();
        game.add_piece(WHITE_PAWN, 12);
        game.remove_piece(BLACK_KNIGHT, 12);
    }
}
