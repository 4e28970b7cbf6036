//! Attack oracle.
//!
//! Answers "does any piece of this color attack that square" from the
//! precomputed reachability masks. Sliding pieces that can reach the target in
//! principle are then checked square by square along the connecting line.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::occupancy_masks::{
    bishop_mask, king_mask, knight_mask, pawn_mask, queen_mask, rook_mask,
};

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = game_state.king_square(color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let target_mask = square_mask(square);
    let occupancy = game_state.occupancy();
    let pieces = |kind: PieceKind| game_state.pieces_of(attacker_color, kind);

    if any_piece_reaches(pieces(PieceKind::Knight), target_mask, knight_mask) {
        return true;
    }
    if any_piece_reaches(pieces(PieceKind::Pawn), target_mask, |from| {
        pawn_mask(attacker_color, from)
    }) {
        return true;
    }
    if any_piece_reaches(pieces(PieceKind::King), target_mask, king_mask) {
        return true;
    }

    for (kind, mask_of) in [
        (PieceKind::Queen, queen_mask as fn(Square) -> u64),
        (PieceKind::Bishop, bishop_mask),
        (PieceKind::Rook, rook_mask),
    ] {
        let mut sliders = pieces(kind);
        while sliders != 0 {
            let from = sliders.trailing_zeros() as Square;
            if mask_of(from) & target_mask != 0 && is_line_clear(occupancy, from, square) {
                return true;
            }
            sliders &= sliders - 1;
        }
    }

    false
}

/// Every piece of `attacker_color` attacking `square`, in the oracle's
/// probing order.
pub fn attackers_to_square(game_state: &GameState, square: Square, attacker_color: Color) -> Vec<(Square, PieceKind)> {
    let target_mask = square_mask(square);
    let occupancy = game_state.occupancy();
    let mut attackers = Vec::new();

    for kind in [
        PieceKind::Knight,
        PieceKind::Pawn,
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Bishop,
        PieceKind::Rook,
    ] {
        let mut pieces = game_state.pieces_of(attacker_color, kind);
        while pieces != 0 {
            let from = pieces.trailing_zeros() as Square;
            let reach = match kind {
                PieceKind::Knight => knight_mask(from),
                PieceKind::Pawn => pawn_mask(attacker_color, from),
                PieceKind::King => king_mask(from),
                PieceKind::Queen => queen_mask(from),
                PieceKind::Bishop => bishop_mask(from),
                PieceKind::Rook => rook_mask(from),
            };
            let is_slider = matches!(kind, PieceKind::Queen | PieceKind::Bishop | PieceKind::Rook);
            if reach & target_mask != 0 && (!is_slider || is_line_clear(occupancy, from, square)) {
                attackers.push((from, kind));
            }
            pieces &= pieces - 1;
        }
    }

    attackers
}

#[inline]
fn any_piece_reaches(mut pieces: u64, target_mask: u64, mask_of: impl Fn(Square) -> u64) -> bool {
    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;
        if mask_of(from) & target_mask != 0 {
            return true;
        }
        pieces &= pieces - 1;
    }
    false
}

/// `from` and `to` must already share a rank, file or diagonal.
fn is_line_clear(occupancy: u64, from: Square, to: Square) -> bool {
    if rank_of(from) == rank_of(to) {
        let rank = rank_of(from);
        let (low, high) = ordered(file_of(from), file_of(to));
        return (low + 1..high).all(|file| occupancy & square_mask(square_at(rank, file)) == 0);
    }

    if file_of(from) == file_of(to) {
        let file = file_of(from);
        let (low, high) = ordered(rank_of(from), rank_of(to));
        return (low + 1..high).all(|rank| occupancy & square_mask(square_at(rank, file)) == 0);
    }

    is_diagonal_clear(occupancy, from, to)
}

/// Diagonal family by index difference: multiples of 9 run a1-h8 wise,
/// multiples of 7 run h1-a8 wise. Crossing the board edge ends the walk as
/// "not attacked".
fn is_diagonal_clear(occupancy: u64, from: Square, to: Square) -> bool {
    let diff = from.abs_diff(to);
    let step: i8 = if diff % 9 == 0 {
        9
    } else if diff % 7 == 0 {
        7
    } else {
        return false;
    };
    let step = if to > from { step } else { -step };

    let mut current = from as i8;
    loop {
        let next = current + step;
        if !(0..NUM_SQUARES as i8).contains(&next) {
            return false;
        }
        if file_of(next as Square).abs_diff(file_of(current as Square)) != 1 {
            return false;
        }

        current = next;
        if current as Square == to {
            return true;
        }
        if occupancy & square_mask(current as Square) != 0 {
            return false;
        }
    }
}

#[inline]
fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::{Move, FLAG_DOUBLE_PAWN_PUSH};
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn squares_between(from: Square, to: Square) -> Vec<Square> {
        let rank_step = (rank_of(to) as i8 - rank_of(from) as i8).signum();
        let file_step = (file_of(to) as i8 - file_of(from) as i8).signum();
        let mut rank = rank_of(from) as i8 + rank_step;
        let mut file = file_of(from) as i8 + file_step;
        let mut between = Vec::new();
        while square_at(rank as u8, file as u8) != to {
            between.push(square_at(rank as u8, file as u8));
            rank += rank_step;
            file += file_step;
        }
        between
    }

    fn lone_slider(kind: PieceKind, square: Square) -> GameState {
        let mut game = GameState::new_empty();
        game.add_piece(Piece::new(Color::White, kind), square);
        game
    }

    #[test]
    fn empty_board_matches_masks_and_single_blockers_cut_the_line() {
        let blocker = Piece::new(Color::Black, PieceKind::Knight);
        for (kind, mask_of) in [
            (PieceKind::Bishop, bishop_mask as fn(Square) -> u64),
            (PieceKind::Rook, rook_mask),
            (PieceKind::Queen, queen_mask),
        ] {
            for from in [0, 7, 27, 36, 56, 63] {
                let game = lone_slider(kind, from);
                for target in 0..64u8 {
                    if target == from {
                        continue;
                    }
                    let reachable = mask_of(from) & square_mask(target) != 0;
                    assert_eq!(
                        is_square_attacked(&game, target, Color::White),
                        reachable,
                        "{kind:?} on {from} vs {target}"
                    );
                    if !reachable {
                        continue;
                    }

                    for middle in squares_between(from, target) {
                        let mut blocked = game.clone();
                        blocked.add_piece(blocker, middle);
                        assert!(
                            !is_square_attacked(&blocked, target, Color::White),
                            "{kind:?} on {from} vs {target} should be blocked by {middle}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn bishops_on_edge_files_do_not_wrap() {
        let a_file = lone_slider(PieceKind::Bishop, sq("a4"));
        assert!(!is_square_attacked(&a_file, sq("h4"), Color::White));
        assert!(!is_square_attacked(&a_file, sq("h5"), Color::White));
        assert!(!is_square_attacked(&a_file, sq("h3"), Color::White));
        assert!(is_square_attacked(&a_file, sq("b5"), Color::White));

        let h_file = lone_slider(PieceKind::Bishop, sq("h4"));
        assert!(!is_square_attacked(&h_file, sq("a6"), Color::White));
        assert!(!is_square_attacked(&h_file, sq("a4"), Color::White));
        assert!(is_square_attacked(&h_file, sq("g3"), Color::White));
    }

    #[test]
    fn long_diagonal_through_corner_is_not_confused() {
        // a8 and a1 differ by 56, a multiple of 7, but are not on a diagonal.
        let game = lone_slider(PieceKind::Queen, sq("a8"));
        assert!(is_square_attacked(&game, sq("a1"), Color::White));
        let mut blocked = game.clone();
        blocked.add_piece(Piece::new(Color::Black, PieceKind::Pawn), sq("a4"));
        assert!(!is_square_attacked(&blocked, sq("a1"), Color::White));
    }

    #[test]
    fn undeveloped_pieces_are_not_attacked_at_the_start() {
        let game = GameState::new_game();
        for square in 0..16u8 {
            assert!(!is_square_attacked(&game, square, Color::Black));
        }
        for square in 48..64u8 {
            assert!(!is_square_attacked(&game, square, Color::White));
        }
        assert!(!is_king_in_check(&game, Color::White));
    }

    #[test]
    fn double_push_sets_en_passant_and_new_pawn_attacks() {
        let mut game = GameState::new_game();
        assert!(!is_square_attacked(&game, sq("d5"), Color::White));

        let push = Move::new(sq("e2"), sq("e4"), None, None, FLAG_DOUBLE_PAWN_PUSH);
        assert!(game.make_move(push));

        assert_eq!(game.en_passant_square(), Some(sq("e3")));
        assert!(is_square_attacked(&game, sq("d5"), Color::White));
        assert!(is_square_attacked(&game, sq("f5"), Color::White));
        assert!(!is_square_attacked(&game, sq("e5"), Color::White));
    }

    #[test]
    fn attackers_list_skips_blocked_sliders() {
        let game = GameState::from_fen("k6B/8/8/8/3P4/4PN2/8/K3R3 w - - 0 1").expect("FEN should parse");
        let target = sq("e5");

        // The e1 rook is screened by the e3 pawn.
        assert_eq!(
            attackers_to_square(&game, target, Color::White),
            vec![
                (sq("f3"), PieceKind::Knight),
                (sq("d4"), PieceKind::Pawn),
                (sq("h8"), PieceKind::Bishop),
            ]
        );
        assert!(attackers_to_square(&game, target, Color::Black).is_empty());
        assert!(is_square_attacked(&game, target, Color::White));

        let mut opened = game.clone();
        opened.remove_piece(Piece::new(Color::White, PieceKind::Pawn), sq("e3"));
        assert!(attackers_to_square(&opened, target, Color::White).contains(&(sq("e1"), PieceKind::Rook)));
    }

    #[test]
    fn knight_and_king_attacks_use_masks() {
        let game = GameState::from_fen("4k3/8/8/8/3n4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game, sq("e2"), Color::Black));
        assert!(is_square_attacked(&game, sq("d7"), Color::Black));
        assert!(!is_square_attacked(&game, sq("d3"), Color::Black));
        assert!(is_square_attacked(&game, sq("d2"), Color::White));
    }
}
