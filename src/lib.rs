//! Crate root module declarations for the kestrel chess engine core.
//!
//! Exposes the incremental position model, the attack oracle and make/unmake
//! engine, pseudo-legal move generation, the alpha-beta search with its
//! transposition table, and the FEN / move-text helpers used at the edges.

pub mod chess_errors;

pub mod game_state {
    pub mod board_setup;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod piece_placement;
    pub mod undo_state;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod occupancy_masks;
    pub mod sliding_attacks;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod move_generator;
    pub mod perft;
    pub mod pseudo_moves_king;
    pub mod pseudo_moves_knight;
    pub mod pseudo_moves_pawn;
    pub mod pseudo_moves_sliding;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod search_info;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod long_algebraic;
}
