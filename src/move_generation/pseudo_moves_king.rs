use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::move_generator::{push_moves_to_targets, GenerationMode};
use crate::moves::move_descriptions::{Move, FLAG_CASTLING};
use crate::moves::occupancy_masks::king_mask;

struct CastlingPath {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    /// Must be empty.
    between: u64,
    /// King passes through; must not be attacked.
    crossing: Square,
}

const WHITE_CASTLING: [CastlingPath; 2] = [
    CastlingPath {
        right: CASTLE_WHITE_KINGSIDE,
        king_from: 4,
        king_to: 6,
        between: square_mask(5) | square_mask(6),
        crossing: 5,
    },
    CastlingPath {
        right: CASTLE_WHITE_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        between: square_mask(1) | square_mask(2) | square_mask(3),
        crossing: 3,
    },
];

const BLACK_CASTLING: [CastlingPath; 2] = [
    CastlingPath {
        right: CASTLE_BLACK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        between: square_mask(61) | square_mask(62),
        crossing: 61,
    },
    CastlingPath {
        right: CASTLE_BLACK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        between: square_mask(57) | square_mask(58) | square_mask(59),
        crossing: 59,
    },
];

pub fn generate_king_moves(game_state: &GameState, side: Color, mode: GenerationMode, out: &mut Vec<Move>) {
    let Some(from) = game_state.king_square(side) else {
        return;
    };
    push_moves_to_targets(game_state, from, king_mask(from) & !game_state.occupancy_of(side), mode, out);

    if mode == GenerationMode::All {
        generate_castling_moves(game_state, side, from, out);
    }
}

/// The destination square itself is left to the `make_move` check test.
fn generate_castling_moves(game_state: &GameState, side: Color, king_from: Square, out: &mut Vec<Move>) {
    let paths = match side {
        Color::White => &WHITE_CASTLING,
        Color::Black => &BLACK_CASTLING,
    };
    let enemy = side.opposite();

    for path in paths {
        if game_state.castling_rights() & path.right == 0
            || king_from != path.king_from
            || game_state.occupancy() & path.between != 0
        {
            continue;
        }
        // Cannot castle out of or through check.
        if is_square_attacked(game_state, king_from, enemy) || is_square_attacked(game_state, path.crossing, enemy) {
            continue;
        }
        out.push(Move::new(king_from, path.king_to, None, None, FLAG_CASTLING));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn castles(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut moves = Vec::new();
        generate_king_moves(&game, game.side_to_move(), GenerationMode::All, &mut moves);
        moves.iter().filter(|mv| mv.is_castle()).map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn both_sides_available_on_open_back_rank() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), vec!["e1g1", "e1c1"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), vec!["e8g8", "e8c8"]);
    }

    #[test]
    fn no_castling_through_an_attacked_square() {
        // Black rook on f8 covers f1.
        assert_eq!(castles("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1"), vec!["e1c1"]);
    }

    #[test]
    fn no_castling_out_of_check() {
        assert!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
    }
}
