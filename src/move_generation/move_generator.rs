//! Pseudo-legal move generation.
//!
//! Generators only respect piece movement and occupancy; whether the mover's
//! king ends up attacked is decided by `GameState::make_move`, which is the
//! single legality gate for search, perft and move parsing alike.

use crate::game_state::chess_rules::MAX_POSITION_MOVES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::pseudo_moves_king::generate_king_moves;
use crate::move_generation::pseudo_moves_knight::generate_knight_moves;
use crate::move_generation::pseudo_moves_pawn::generate_pawn_moves;
use crate::move_generation::pseudo_moves_sliding::generate_sliding_moves;
use crate::moves::move_descriptions::{Move, FLAG_CAPTURE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    All,
    CapturesOnly,
}

pub trait MoveGenerator: Send + Sync {
    /// Append candidate moves for `color` (the side to move when `None`).
    fn generate_moves(&self, game_state: &GameState, color: Option<Color>, out: &mut Vec<Move>);

    /// Like `generate_moves` but only moves flagged as captures.
    fn generate_captures(&self, game_state: &GameState, color: Option<Color>, out: &mut Vec<Move>);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoLegalMoveGenerator;

impl PseudoLegalMoveGenerator {
    fn generate(&self, game_state: &GameState, color: Option<Color>, mode: GenerationMode, out: &mut Vec<Move>) {
        let side = color.unwrap_or(game_state.side_to_move());
        out.reserve(MAX_POSITION_MOVES.saturating_sub(out.len()));

        generate_pawn_moves(game_state, side, mode, out);
        generate_knight_moves(game_state, side, mode, out);
        generate_sliding_moves(game_state, side, mode, out);
        generate_king_moves(game_state, side, mode, out);

        debug_assert!(
            out.len() <= MAX_POSITION_MOVES,
            "generated {} moves, more than the {MAX_POSITION_MOVES} a position can hold",
            out.len()
        );
    }
}

impl MoveGenerator for PseudoLegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState, color: Option<Color>, out: &mut Vec<Move>) {
        self.generate(game_state, color, GenerationMode::All, out);
    }

    fn generate_captures(&self, game_state: &GameState, color: Option<Color>, out: &mut Vec<Move>) {
        self.generate(game_state, color, GenerationMode::CapturesOnly, out);
    }
}

/// Moves for the side to move that `make_move` accepts.
pub fn legal_moves(game_state: &mut GameState, generator: &impl MoveGenerator) -> Vec<Move> {
    let mut candidates = Vec::with_capacity(MAX_POSITION_MOVES);
    generator.generate_moves(game_state, None, &mut candidates);
    candidates.retain(|&mv| {
        let accepted = game_state.make_move(mv);
        if accepted {
            game_state.take_move();
        }
        accepted
    });
    candidates
}

/// Push a quiet move or capture from `from` to every square in `targets`.
/// `targets` must already exclude friendly pieces.
pub(crate) fn push_moves_to_targets(
    game_state: &GameState,
    from: Square,
    mut targets: u64,
    mode: GenerationMode,
    out: &mut Vec<Move>,
) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        match game_state.piece_on(to) {
            Some(captured) => out.push(Move::new(from, to, Some(captured), None, FLAG_CAPTURE)),
            None if mode == GenerationMode::All => out.push(Move::quiet(from, to)),
            None => {}
        }
        targets &= targets - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(fen: &str, color: Option<Color>, mode: GenerationMode) -> Vec<Move> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut moves = Vec::new();
        match mode {
            GenerationMode::All => PseudoLegalMoveGenerator.generate_moves(&game, color, &mut moves),
            GenerationMode::CapturesOnly => {
                PseudoLegalMoveGenerator.generate_captures(&game, color, &mut moves)
            }
        }
        moves
    }

    #[test]
    fn starting_position_has_twenty_moves_per_side() {
        let fen = crate::game_state::chess_rules::STARTING_POSITION_FEN;
        assert_eq!(generate(fen, None, GenerationMode::All).len(), 20);
        assert_eq!(generate(fen, Some(Color::Black), GenerationMode::All).len(), 20);
        assert!(generate(fen, None, GenerationMode::CapturesOnly).is_empty());
    }

    #[test]
    fn captures_only_yields_flagged_captures() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let all = generate(fen, None, GenerationMode::All);
        let captures = generate(fen, None, GenerationMode::CapturesOnly);

        assert_eq!(captures.len(), 8);
        assert!(captures.iter().all(|mv| mv.is_capture() && mv.captured().is_some()));
        assert_eq!(all.iter().filter(|mv| mv.is_capture()).count(), captures.len());
    }

    #[test]
    fn legal_moves_drops_moves_into_check() {
        let mut game = GameState::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        let legal = legal_moves(&mut game, &PseudoLegalMoveGenerator);
        // Only king moves off the e-file survive, the pinned bishop cannot move.
        assert!(legal.iter().all(|mv| mv.from() == 4));
        assert_eq!(legal.len(), 4);
    }
}
