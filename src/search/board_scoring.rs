//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search delegates static scoring to `BoardScorer`, so heuristics can be
//! swapped without touching search code. Both scorers here read only the
//! incrementally maintained tables on `GameState` and never scan the board.

use crate::game_state::{chess_types::*, game_state::GameState};

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[inline]
fn from_side_to_move(game_state: &GameState, white_minus_black: i32) -> i32 {
    match game_state.side_to_move() {
        Color::White => white_minus_black,
        Color::Black => -white_minus_black,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        from_side_to_move(
            game_state,
            game_state.material(Color::White) - game_state.material(Color::Black),
        )
    }
}

/// Material plus a few pawn-structure terms from the pawn tables.
#[derive(Debug, Clone, Copy)]
pub struct PawnStructureScorer {
    /// Per pawn beyond the first on a file.
    pub doubled_pawn_penalty: i32,
    /// Per pawn with no friendly pawn on either neighbouring file.
    pub isolated_pawn_penalty: i32,
    /// Per pawn attack on d4, e4, d5 or e5.
    pub centre_control_bonus: i32,
}

impl Default for PawnStructureScorer {
    fn default() -> Self {
        Self {
            doubled_pawn_penalty: 12,
            isolated_pawn_penalty: 15,
            centre_control_bonus: 6,
        }
    }
}

const CENTRE_SQUARES: [Square; 4] = [27, 28, 35, 36];

impl PawnStructureScorer {
    fn pawn_terms(&self, game_state: &GameState, color: Color) -> i32 {
        let mut score = 0;

        for file in 0..8u8 {
            let count = game_state.pawns_on_file(color, file) as i32;
            if count == 0 {
                continue;
            }
            if count > 1 {
                score -= (count - 1) * self.doubled_pawn_penalty;
            }

            let left = file.checked_sub(1).map_or(0, |f| game_state.pawns_on_file(color, f));
            let right = if file < FILE_H {
                game_state.pawns_on_file(color, file + 1)
            } else {
                0
            };
            if left == 0 && right == 0 {
                score -= count * self.isolated_pawn_penalty;
            }
        }

        for square in CENTRE_SQUARES {
            score += game_state.pawn_control(color, square) as i32 * self.centre_control_bonus;
        }

        score
    }
}

impl BoardScorer for PawnStructureScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let material = game_state.material(Color::White) - game_state.material(Color::Black);
        let structure = self.pawn_terms(game_state, Color::White) - self.pawn_terms(game_state, Color::Black);
        from_side_to_move(game_state, material + structure)
    }
}
