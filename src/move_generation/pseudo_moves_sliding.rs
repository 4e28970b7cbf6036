use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::{push_moves_to_targets, GenerationMode};
use crate::moves::move_descriptions::Move;
use crate::moves::sliding_attacks::{bishop_attacks, queen_attacks, rook_attacks};

/// Bishops, rooks and queens.
pub fn generate_sliding_moves(game_state: &GameState, side: Color, mode: GenerationMode, out: &mut Vec<Move>) {
    let own_occ = game_state.occupancy_of(side);
    let occupancy = game_state.occupancy();

    for kind in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        let mut sliders = game_state.pieces_of(side, kind);
        while sliders != 0 {
            let from = sliders.trailing_zeros() as Square;
            let attacks = match kind {
                PieceKind::Bishop => bishop_attacks(from, occupancy),
                PieceKind::Rook => rook_attacks(from, occupancy),
                _ => queen_attacks(from, occupancy),
            };
            push_moves_to_targets(game_state, from, attacks & !own_occ, mode, out);
            sliders &= sliders - 1;
        }
    }
}
