//! Make/unmake engine.
//!
//! `make_move` applies a move in place, records an undo entry and rejects the
//! move (undoing it again) if the mover's own king is left attacked.
//! `take_move` reverses the most recent accepted move exactly.

use crate::game_state::{
    chess_types::*,
    game_state::GameState,
    undo_state::UndoState,
};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::move_descriptions::Move;
use crate::search::zobrist::en_passant_key;

/// Rights that survive a move touching each square. Moving from or capturing
/// on a king or rook home square strips the matching rights.
const CASTLING_RIGHTS_MASK: [CastlingRights; NUM_SQUARES] = {
    let mut table = [CASTLE_ALL; NUM_SQUARES];
    table[0] = CASTLE_ALL & !CASTLE_WHITE_QUEENSIDE;
    table[4] = CASTLE_ALL & !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE);
    table[7] = CASTLE_ALL & !CASTLE_WHITE_KINGSIDE;
    table[56] = CASTLE_ALL & !CASTLE_BLACK_QUEENSIDE;
    table[60] = CASTLE_ALL & !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    table[63] = CASTLE_ALL & !CASTLE_BLACK_KINGSIDE;
    table
};

/// Rook relocation for a castling move, keyed by the king's destination.
#[inline]
fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        6 => (7, 5),
        2 => (0, 3),
        62 => (63, 61),
        58 => (56, 59),
        _ => panic!("castling move with king destination {king_to}"),
    }
}

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline]
fn en_passant_victim_square(mover: Color, to: Square) -> Square {
    match mover {
        Color::White => to - 8,
        Color::Black => to + 8,
    }
}

impl GameState {
    /// Apply `mv` for the side to move. Returns `false`, with the position
    /// unchanged, if the move would leave that side's king attacked.
    pub fn make_move(&mut self, mv: Move) -> bool {
        self.debug_validate();

        let from = mv.from();
        let to = mv.to();
        let mover = self.side_to_move;
        let Some(moving) = self.piece_on(from) else {
            panic!("make_move: no piece on {from} for {mv}");
        };

        self.history.push(UndoState {
            mv,
            prev_en_passant_square: self.en_passant_square,
            prev_castling_rights: self.castling_rights,
            prev_fifty_move_counter: self.fifty_move_counter,
            prev_hash: self.hash,
        });

        if mv.is_en_passant() {
            self.remove_piece(
                Piece::new(mover.opposite(), PieceKind::Pawn),
                en_passant_victim_square(mover, to),
            );
        } else if mv.is_castle() {
            let (rook_from, rook_to) = castling_rook_squares(to);
            self.move_piece(rook_from, rook_to);
        }

        if let Some(ep_square) = self.en_passant_square.take() {
            self.hash ^= en_passant_key(ep_square);
        }
        self.set_castling_rights(
            self.castling_rights & CASTLING_RIGHTS_MASK[from as usize] & CASTLING_RIGHTS_MASK[to as usize],
        );

        self.fifty_move_counter = self.fifty_move_counter.saturating_add(1);

        if mv.is_capture() {
            if !mv.is_en_passant() {
                let Some(captured) = mv.captured() else {
                    panic!("make_move: capture {mv} carries no captured piece");
                };
                self.remove_piece(captured, to);
            }
            self.fifty_move_counter = 0;
        }

        if moving.kind == PieceKind::Pawn {
            self.fifty_move_counter = 0;
            if mv.is_double_pawn_push() {
                let ep_square = (from + to) / 2;
                self.en_passant_square = Some(ep_square);
                self.hash ^= en_passant_key(ep_square);
            }
        }

        self.move_piece(from, to);

        if let Some(promoted) = mv.promoted() {
            self.remove_piece(moving, to);
            self.add_piece(promoted, to);
        }

        if mover == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.ply += 1;
        self.flip_side();

        if let Some(king_sq) = self.king_square(mover) {
            if is_square_attacked(self, king_sq, self.side_to_move) {
                self.take_move();
                return false;
            }
        }

        self.debug_validate();
        true
    }

    /// Reverse the most recent accepted move.
    pub fn take_move(&mut self) {
        let Some(undo) = self.history.pop() else {
            panic!("take_move called with an empty history");
        };
        let mv = undo.mv;
        let from = mv.from();
        let to = mv.to();

        self.ply = self.ply.saturating_sub(1);
        self.flip_side();
        let mover = self.side_to_move;
        if mover == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_sub(1);
        }

        if let Some(ep_square) = self.en_passant_square {
            self.hash ^= en_passant_key(ep_square);
        }
        self.en_passant_square = undo.prev_en_passant_square;
        if let Some(ep_square) = self.en_passant_square {
            self.hash ^= en_passant_key(ep_square);
        }
        self.set_castling_rights(undo.prev_castling_rights);
        self.fifty_move_counter = undo.prev_fifty_move_counter;

        if let Some(promoted) = mv.promoted() {
            self.remove_piece(promoted, to);
            self.add_piece(Piece::new(mover, PieceKind::Pawn), to);
        }

        self.move_piece(to, from);

        if mv.is_en_passant() {
            self.add_piece(
                Piece::new(mover.opposite(), PieceKind::Pawn),
                en_passant_victim_square(mover, to),
            );
        } else if mv.is_castle() {
            let (rook_from, rook_to) = castling_rook_squares(to);
            self.move_piece(rook_to, rook_from);
        } else if let Some(captured) = mv.captured().filter(|_| mv.is_capture()) {
            self.add_piece(captured, to);
        }

        debug_assert_eq!(self.hash, undo.prev_hash, "take_move did not restore the hash");
        self.debug_validate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::move_generator::{MoveGenerator, PseudoLegalMoveGenerator};
    use crate::moves::move_descriptions::{FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH};
    use crate::utils::algebraic::algebraic_to_square;

    const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    const ROUND_TRIP_FENS: [&str; 6] = [
        crate::game_state::chess_rules::STARTING_POSITION_FEN,
        KIWIPETE_FEN,
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r1bqkbnr/pppp2pp/2n1pp2/8/8/3BPN2/PPPP1PPP/RNBQK2R w KQkq - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
    ];

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn pseudo_moves(game: &GameState) -> Vec<Move> {
        let mut moves = Vec::new();
        PseudoLegalMoveGenerator.generate_moves(game, None, &mut moves);
        moves
    }

    fn assert_round_trips(game: &mut GameState, depth: u32) {
        for mv in pseudo_moves(game) {
            let before = game.clone();
            if game.make_move(mv) {
                assert_eq!(game.validate(), Ok(()), "after making {mv}");
                if depth > 1 {
                    assert_round_trips(game, depth - 1);
                }
                game.take_move();
            }
            assert_eq!(*game, before, "{mv} did not round trip");
        }
    }

    #[test]
    fn every_move_round_trips_two_plies_deep() {
        for fen in ROUND_TRIP_FENS {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            assert_round_trips(&mut game, 2);
        }
    }

    #[test]
    fn double_push_records_en_passant_and_restores_hash() {
        let mut game = GameState::new_game();
        let before = game.clone();
        assert!(game.make_move(Move::new(sq("e2"), sq("e4"), None, None, FLAG_DOUBLE_PAWN_PUSH)));
        assert_eq!(game.en_passant_square(), Some(sq("e3")));
        assert_eq!(game.fifty_move_counter(), 0);
        assert_ne!(game.hash(), before.hash());
        game.take_move();
        assert_eq!(game, before);
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let mut game = GameState::from_fen(ROUND_TRIP_FENS[4]).expect("FEN should parse");
        let before = game.clone();
        let ep = pseudo_moves(&game)
            .into_iter()
            .find(|mv| mv.is_en_passant())
            .expect("e5xf6 should be generated");
        assert!(game.make_move(ep));
        assert_eq!(game.piece_on(sq("f5")), None);
        assert_eq!(game.piece_on(sq("f6")), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(game.material(Color::Black), before.material(Color::Black) - 100);
        game.take_move();
        assert_eq!(game, before);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut game = GameState::from_fen(ROUND_TRIP_FENS[3]).expect("FEN should parse");
        let before = game.clone();
        assert!(game.make_move(Move::new(sq("e1"), sq("g1"), None, None, FLAG_CASTLING)));
        assert_eq!(game.piece_on(sq("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(game.king_square(Color::White), Some(sq("g1")));
        assert_eq!(game.castling_rights(), CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        assert_ne!(game.hash(), before.hash());
        game.take_move();
        assert_eq!(game, before);
    }

    #[test]
    fn move_into_check_is_rejected_and_position_untouched() {
        // The e2 bishop is pinned against the king by the e8 rook.
        let mut game = GameState::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        let before = game.clone();
        assert!(!game.make_move(Move::quiet(sq("e2"), sq("d3"))));
        assert_eq!(game, before);
        assert_eq!(game.history_ply(), 0);
    }

    #[test]
    fn promotion_swaps_material() {
        let mut game = GameState::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").expect("FEN should parse");
        let queen = Piece::new(Color::White, PieceKind::Queen);
        assert!(game.make_move(Move::new(sq("e7"), sq("e8"), None, Some(queen), 0)));
        assert_eq!(game.piece_on(sq("e8")), Some(queen));
        assert_eq!(game.material(Color::White), 20_000 + 900);
        assert_eq!(game.pawns_on_file(Color::White, 4), 0);
        game.take_move();
        assert_eq!(game.material(Color::White), 20_000 + 100);
    }

    #[test]
    #[should_panic(expected = "empty history")]
    fn take_move_without_history_panics() {
        GameState::new_game().take_move();
    }
}
