//! Leaf-node counting over the make/unmake engine.
//!
//! Node counts on well-known positions catch generator bugs, make/take
//! asymmetries and legality-gate mistakes together.

use crate::game_state::chess_rules::MAX_POSITION_MOVES;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }

    /// Classify the move that produced a leaf. `game_state` is the position
    /// after the move.
    fn record_leaf(&mut self, mv: Move, game_state: &GameState) {
        self.nodes += 1;
        self.captures += u64::from(mv.is_capture());
        self.en_passant += u64::from(mv.is_en_passant());
        self.castles += u64::from(mv.is_castle());
        self.promotions += u64::from(mv.is_promotion());
        self.checks += u64::from(is_king_in_check(game_state, game_state.side_to_move()));
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut counts = PerftCounts::default();
    perft_recurse(generator, game_state, depth, &mut counts);
    counts
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide<G: MoveGenerator>(generator: &G, game_state: &mut GameState, depth: u8) -> Vec<(Move, u64)> {
    let mut moves = Vec::with_capacity(MAX_POSITION_MOVES);
    generator.generate_moves(game_state, None, &mut moves);

    let mut divided = Vec::with_capacity(moves.len());
    for mv in moves {
        if !game_state.make_move(mv) {
            continue;
        }
        let nodes = perft(generator, game_state, depth.saturating_sub(1)).nodes;
        game_state.take_move();
        divided.push((mv, nodes));
    }
    divided
}

fn perft_recurse<G: MoveGenerator>(generator: &G, game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    let mut moves = Vec::with_capacity(MAX_POSITION_MOVES);
    generator.generate_moves(game_state, None, &mut moves);

    for mv in moves {
        if !game_state.make_move(mv) {
            continue;
        }
        if depth == 1 {
            counts.record_leaf(mv, game_state);
        } else {
            let mut child = PerftCounts::default();
            perft_recurse(generator, game_state, depth - 1, &mut child);
            counts.merge(child);
        }
        game_state.take_move();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::move_generation::move_generator::PseudoLegalMoveGenerator;

    fn run(fen: &str, depth: u8) -> PerftCounts {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let before = game.clone();
        let counts = perft(&PseudoLegalMoveGenerator, &mut game, depth);
        assert_eq!(game, before, "perft must leave the position untouched");
        counts
    }

    #[test]
    fn starting_position() {
        assert_eq!(run(STARTING_POSITION_FEN, 1).nodes, 20);
        assert_eq!(run(STARTING_POSITION_FEN, 2).nodes, 400);

        let depth_three = run(STARTING_POSITION_FEN, 3);
        assert_eq!(depth_three.nodes, 8_902);
        assert_eq!(depth_three.captures, 34);
        assert_eq!(depth_three.checks, 12);
    }

    #[test]
    fn kiwipete() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let depth_one = run(fen, 1);
        assert_eq!(depth_one.nodes, 48);
        assert_eq!(depth_one.captures, 8);
        assert_eq!(depth_one.castles, 2);

        let depth_two = run(fen, 2);
        assert_eq!(depth_two.nodes, 2_039);
        assert_eq!(depth_two.captures, 351);
        assert_eq!(depth_two.en_passant, 1);
        assert_eq!(depth_two.castles, 91);
        assert_eq!(depth_two.checks, 3);
    }

    #[test]
    fn rook_endgame_with_en_passant_pins() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(run(fen, 1).nodes, 14);
        assert_eq!(run(fen, 2).nodes, 191);

        let depth_three = run(fen, 3);
        assert_eq!(depth_three.nodes, 2_812);
        assert_eq!(depth_three.captures, 209);
        assert_eq!(depth_three.en_passant, 2);
        assert_eq!(depth_three.checks, 267);
    }

    #[test]
    fn promotion_heavy_position() {
        let fen = "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1";
        assert_eq!(run(fen, 1).nodes, 24);
        assert_eq!(run(fen, 2).nodes, 496);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut game = GameState::new_game();
        let divided = perft_divide(&PseudoLegalMoveGenerator, &mut game, 2);
        assert_eq!(divided.len(), 20);
        assert_eq!(divided.iter().map(|(_, nodes)| nodes).sum::<u64>(), 400);
    }
}
