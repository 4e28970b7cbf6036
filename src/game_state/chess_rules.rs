//! Canonical chess-rule constants and engine ceilings.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Capacity of the per-position undo history.
pub const MAX_GAME_MOVES: usize = 2048;

/// Hard ceiling on search recursion; also sizes the PV and killer buffers.
pub const MAX_SEARCH_DEPTH: usize = 64;

/// Upper bound on pseudo-legal moves from any reachable position.
pub const MAX_POSITION_MOVES: usize = 256;

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u16 = 100;
