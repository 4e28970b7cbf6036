//! Heuristic move ordering for alpha-beta.
//!
//! Order: transposition-table move, captures by most valuable victim then
//! least valuable attacker, quiet promotions, the two killer moves for the
//! current ply, then quiet moves by history score.

use crate::game_state::chess_rules::MAX_SEARCH_DEPTH;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;

const TT_MOVE_SCORE: i32 = 2_000_000;
const CAPTURE_BASE_SCORE: i32 = 1_000_000;
const PROMOTION_SCORE: i32 = 950_000;
const KILLER_SCORES: [i32; 2] = [900_000, 800_000];
/// History scores are clamped below the killer band.
const HISTORY_LIMIT: i32 = 700_000;

#[derive(Debug, Clone)]
pub struct MoveOrdering {
    history: [[i32; NUM_SQUARES]; NUM_PIECES],
    killers: [[Option<Move>; 2]; MAX_SEARCH_DEPTH],
}

impl Default for MoveOrdering {
    fn default() -> Self {
        Self {
            history: [[0; NUM_SQUARES]; NUM_PIECES],
            killers: [[None; 2]; MAX_SEARCH_DEPTH],
        }
    }
}

impl MoveOrdering {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn killers(&self, ply: usize) -> [Option<Move>; 2] {
        self.killers.get(ply).copied().unwrap_or([None; 2])
    }

    #[inline]
    pub fn history_score(&self, piece: Piece, to: Square) -> i32 {
        self.history[piece.index()][to as usize]
    }

    /// Remember a quiet move that caused a beta cutoff. `game_state` must be
    /// the position the move is played from.
    pub fn record_cutoff(&mut self, game_state: &GameState, mv: Move, ply: usize, depth: u8) {
        if !mv.is_quiet() {
            return;
        }

        if let Some(slots) = self.killers.get_mut(ply) {
            if slots[0] != Some(mv) {
                slots[1] = slots[0];
                slots[0] = Some(mv);
            }
        }

        if let Some(piece) = game_state.piece_on(mv.from()) {
            let depth = i32::from(depth);
            let entry = &mut self.history[piece.index()][mv.to() as usize];
            *entry = (*entry + depth * depth).min(HISTORY_LIMIT);
        }
    }

    /// One ordering score per move, parallel to `moves`.
    pub fn score_moves(&self, game_state: &GameState, moves: &[Move], ply: usize, tt_move: Option<Move>) -> Vec<i32> {
        let killers = self.killers(ply);
        moves
            .iter()
            .map(|&mv| self.score_move(game_state, mv, killers, tt_move))
            .collect()
    }

    fn score_move(&self, game_state: &GameState, mv: Move, killers: [Option<Move>; 2], tt_move: Option<Move>) -> i32 {
        if tt_move == Some(mv) {
            return TT_MOVE_SCORE;
        }

        let attacker = game_state.piece_on(mv.from());
        if let Some(victim) = mv.captured().filter(|_| mv.is_capture()) {
            let attacker_rank = attacker.map_or(0, |piece| piece.kind.index() as i32);
            return CAPTURE_BASE_SCORE + (victim.kind.index() as i32 + 1) * 100 - attacker_rank;
        }
        if mv.is_promotion() {
            return PROMOTION_SCORE + mv.promoted().map_or(0, |piece| piece.kind.index() as i32);
        }
        if let Some(slot) = killers.iter().position(|&killer| killer == Some(mv)) {
            return KILLER_SCORES[slot];
        }
        attacker.map_or(0, |piece| self.history_score(piece, mv.to()))
    }
}

/// Swap the highest-scored move in `start..` into `start`.
pub fn bring_best_move_to_top(moves: &mut [Move], scores: &mut [i32], start: usize) {
    let Some(best) = (start..moves.len()).max_by_key(|&i| scores[i]) else {
        return;
    };
    moves.swap(start, best);
    scores.swap(start, best);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::FLAG_CAPTURE;

    const BLACK_QUEEN: Piece = Piece::new(Color::Black, PieceKind::Queen);
    const BLACK_PAWN: Piece = Piece::new(Color::Black, PieceKind::Pawn);

    #[test]
    fn tt_move_beats_captures_and_captures_beat_quiets() {
        // White pawn on d4 and rook on a5 can both take; the pawn on e5 and queen on h5.
        let game = GameState::from_fen("4k3/8/8/R3p2q/3P4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let quiet = Move::quiet(4, 12);
        let rook_takes_pawn = Move::new(32, 36, Some(BLACK_PAWN), None, FLAG_CAPTURE);
        let pawn_takes_pawn = Move::new(27, 36, Some(BLACK_PAWN), None, FLAG_CAPTURE);
        let rook_takes_queen = Move::new(32, 39, Some(BLACK_QUEEN), None, FLAG_CAPTURE);

        let ordering = MoveOrdering::default();
        let mut moves = vec![quiet, rook_takes_pawn, pawn_takes_pawn, rook_takes_queen];
        let mut scores = ordering.score_moves(&game, &moves, 0, Some(quiet));

        let mut picked = Vec::new();
        for i in 0..moves.len() {
            bring_best_move_to_top(&mut moves, &mut scores, i);
            picked.push(moves[i]);
        }
        assert_eq!(picked, vec![quiet, rook_takes_queen, pawn_takes_pawn, rook_takes_pawn]);
    }

    #[test]
    fn killers_rank_above_history() {
        let game = GameState::new_game();
        let mut ordering = MoveOrdering::default();
        let knight_out = Move::quiet(6, 21);
        let pawn_push = Move::quiet(11, 19);

        ordering.record_cutoff(&game, pawn_push, 3, 6);
        ordering.record_cutoff(&game, knight_out, 3, 1);

        assert_eq!(ordering.killers(3), [Some(knight_out), Some(pawn_push)]);
        let scores = ordering.score_moves(&game, &[knight_out, pawn_push, Move::quiet(12, 20)], 3, None);
        assert_eq!(scores[0], KILLER_SCORES[0]);
        assert_eq!(scores[1], KILLER_SCORES[1]);
        assert_eq!(scores[2], 0);

        let white_pawn = Piece::new(Color::White, PieceKind::Pawn);
        assert_eq!(ordering.history_score(white_pawn, 19), 36);
    }

    #[test]
    fn captures_are_not_recorded_as_killers() {
        let game = GameState::from_fen("4k3/8/8/4p3/3P4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut ordering = MoveOrdering::default();
        ordering.record_cutoff(&game, Move::new(27, 36, Some(BLACK_PAWN), None, FLAG_CAPTURE), 0, 4);
        assert_eq!(ordering.killers(0), [None, None]);
    }
}
