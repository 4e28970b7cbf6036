use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::GenerationMode;
use crate::moves::move_descriptions::{Move, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};
use crate::moves::occupancy_masks::pawn_mask;

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

pub fn generate_pawn_moves(game_state: &GameState, side: Color, mode: GenerationMode, out: &mut Vec<Move>) {
    let enemy_occ = game_state.occupancy_of(side.opposite());
    let empty = !game_state.occupancy();
    let (start_rank, promotion_rank) = match side {
        Color::White => (1, RANK_8),
        Color::Black => (6, RANK_1),
    };
    // En passant belongs to the side to move only.
    let en_passant = game_state
        .en_passant_square()
        .filter(|_| side == game_state.side_to_move());

    let mut pawns = game_state.pieces_of(side, PieceKind::Pawn);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        let mut captures = pawn_mask(side, from) & enemy_occ;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            captures &= captures - 1;
            let captured = game_state.piece_on(to);
            push_pawn_move(side, from, to, captured, FLAG_CAPTURE, promotion_rank, out);
        }

        if let Some(ep_square) = en_passant {
            if pawn_mask(side, from) & square_mask(ep_square) != 0 {
                let victim = Piece::new(side.opposite(), PieceKind::Pawn);
                out.push(Move::new(from, ep_square, Some(victim), None, FLAG_CAPTURE | FLAG_EN_PASSANT));
            }
        }

        if mode == GenerationMode::CapturesOnly {
            continue;
        }

        let one_step = match side {
            Color::White => from + 8,
            Color::Black => from - 8,
        };
        if square_mask(one_step) & empty == 0 {
            continue;
        }
        push_pawn_move(side, from, one_step, None, 0, promotion_rank, out);

        if rank_of(from) == start_rank {
            let two_step = match side {
                Color::White => from + 16,
                Color::Black => from - 16,
            };
            if square_mask(two_step) & empty != 0 {
                out.push(Move::new(from, two_step, None, None, FLAG_DOUBLE_PAWN_PUSH));
            }
        }
    }
}

fn push_pawn_move(
    side: Color,
    from: Square,
    to: Square,
    captured: Option<Piece>,
    flags: u32,
    promotion_rank: u8,
    out: &mut Vec<Move>,
) {
    if rank_of(to) == promotion_rank {
        for kind in PROMOTION_KINDS {
            out.push(Move::new(from, to, captured, Some(Piece::new(side, kind)), flags));
        }
    } else {
        out.push(Move::new(from, to, captured, None, flags));
    }
}
