//! Precomputed per-square occupancy masks.
//!
//! Knight, king and pawn masks are exact attack sets. Bishop, rook and queen
//! masks are *reachability* masks: every square on the piece's lines with no
//! blockers considered. The attack oracle pairs them with a blocking search.
//! All tables are built at compile time and never mutated.

use crate::game_state::chess_types::{Color, Square};

pub const KNIGHT_MASKS: [u64; 64] = build_knight_masks();
pub const KING_MASKS: [u64; 64] = build_king_masks();
pub const WHITE_PAWN_MASKS: [u64; 64] = build_pawn_masks(1);
pub const BLACK_PAWN_MASKS: [u64; 64] = build_pawn_masks(-1);
pub const BISHOP_MASKS: [u64; 64] = build_slider_masks(&[(1, 1), (-1, 1), (1, -1), (-1, -1)]);
pub const ROOK_MASKS: [u64; 64] = build_slider_masks(&[(0, 1), (0, -1), (1, 0), (-1, 0)]);
pub const QUEEN_MASKS: [u64; 64] = build_queen_masks();

#[inline]
pub const fn knight_mask(square: Square) -> u64 {
    KNIGHT_MASKS[square as usize]
}

#[inline]
pub const fn king_mask(square: Square) -> u64 {
    KING_MASKS[square as usize]
}

/// Squares a pawn of `color` standing on `square` could capture onto.
#[inline]
pub const fn pawn_mask(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_MASKS[square as usize],
        Color::Black => BLACK_PAWN_MASKS[square as usize],
    }
}

#[inline]
pub const fn bishop_mask(square: Square) -> u64 {
    BISHOP_MASKS[square as usize]
}

#[inline]
pub const fn rook_mask(square: Square) -> u64 {
    ROOK_MASKS[square as usize]
}

#[inline]
pub const fn queen_mask(square: Square) -> u64 {
    QUEEN_MASKS[square as usize]
}

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const fn build_knight_masks() -> [u64; 64] {
    build_step_masks(&KNIGHT_JUMPS)
}

const fn build_king_masks() -> [u64; 64] {
    build_step_masks(&KING_STEPS)
}

const fn build_step_masks(steps: &[(i32, i32); 8]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut mask = 0u64;
        let mut i = 0usize;
        while i < steps.len() {
            mask |= set_if_valid(file + steps[i].0, rank + steps[i].1);
            i += 1;
        }
        table[sq] = mask;
        sq += 1;
    }

    table
}

/// `forward` is +1 for white (towards rank 8) and -1 for black.
const fn build_pawn_masks(forward: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        table[sq] = set_if_valid(file - 1, rank + forward) | set_if_valid(file + 1, rank + forward);
        sq += 1;
    }

    table
}

const fn build_slider_masks(directions: &[(i32, i32); 4]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut mask = 0u64;
        let mut d = 0usize;
        while d < directions.len() {
            mask |= trace_unblocked(sq as i32, directions[d].0, directions[d].1);
            d += 1;
        }
        table[sq] = mask;
        sq += 1;
    }

    table
}

const fn build_queen_masks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = BISHOP_MASKS[sq] | ROOK_MASKS[sq];
        sq += 1;
    }

    table
}

const fn trace_unblocked(square: i32, file_step: i32, rank_step: i32) -> u64 {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut mask = 0u64;

    while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
        mask |= 1u64 << (rank * 8 + file);
        file += file_step;
        rank += rank_step;
    }

    mask
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << (rank * 8 + file)
}
