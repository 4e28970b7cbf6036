//! Long algebraic move text (`e2e4`, `e7e8q`, `e1g1`).
//!
//! Text is resolved against the generated moves of a position, so the flags
//! and captured piece always come from the generator rather than from the text.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{legal_moves, MoveGenerator};
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

/// Syntactic parts of a move: from, to and an optional promotion kind.
pub fn split_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let malformed = || ChessError::InvalidMoveText(text.to_owned());
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(malformed());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| malformed())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| malformed())?;
    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(b'n') => Some(PieceKind::Knight),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'q') => Some(PieceKind::Queen),
        Some(_) => return Err(malformed()),
    };

    Ok((from, to, promotion))
}

/// Resolve move text to the legal move it names in `game_state`.
pub fn parse_move(game_state: &mut GameState, text: &str, generator: &impl MoveGenerator) -> ChessResult<Move> {
    let (from, to, promotion) = split_long_algebraic(text)?;

    legal_moves(game_state, generator)
        .into_iter()
        .find(|mv| mv.from() == from && mv.to() == to && mv.promoted().map(|piece| piece.kind) == promotion)
        .ok_or_else(|| ChessError::IllegalMove(text.to_owned()))
}

/// Play a whitespace-separated list of moves, stopping at the first bad one.
pub fn apply_move_list(game_state: &mut GameState, moves: &str, generator: &impl MoveGenerator) -> ChessResult<Vec<Move>> {
    let mut played = Vec::new();
    for text in moves.split_whitespace() {
        let mv = parse_move(game_state, text, generator)?;
        if !game_state.make_move(mv) {
            return Err(ChessError::IllegalMove(text.to_owned()));
        }
        played.push(mv);
    }
    Ok(played)
}
