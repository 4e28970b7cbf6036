//! Counters accumulated over one search invocation.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchInfo {
    /// Requested iterative-deepening depth.
    pub depth: u8,
    /// Moves tried, legal or not.
    pub nodes: u64,
    /// Moves `make_move` rejected because the mover's king was left attacked.
    pub invalid_moves: u64,
    pub tt_inserts: u64,
    pub repetitions: u64,
    pub fifty_move_draws: u64,
    /// Nodes cut off at the fixed search-depth ceiling.
    pub max_depth_reached: u64,
}

impl fmt::Display for SearchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "depth:            {}", self.depth)?;
        writeln!(f, "nodes:            {}", self.nodes)?;
        writeln!(f, "invalid moves:    {}", self.invalid_moves)?;
        writeln!(f, "tt inserts:       {}", self.tt_inserts)?;
        writeln!(f, "repetitions:      {}", self.repetitions)?;
        writeln!(f, "fifty-move draws: {}", self.fifty_move_draws)?;
        write!(f, "depth ceiling:    {}", self.max_depth_reached)
    }
}
