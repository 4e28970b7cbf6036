use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::{push_moves_to_targets, GenerationMode};
use crate::moves::move_descriptions::Move;
use crate::moves::occupancy_masks::knight_mask;

pub fn generate_knight_moves(game_state: &GameState, side: Color, mode: GenerationMode, out: &mut Vec<Move>) {
    let own_occ = game_state.occupancy_of(side);

    let mut knights = game_state.pieces_of(side, PieceKind::Knight);
    while knights != 0 {
        let from = knights.trailing_zeros() as Square;
        push_moves_to_targets(game_state, from, knight_mask(from) & !own_occ, mode, out);
        knights &= knights - 1;
    }
}
