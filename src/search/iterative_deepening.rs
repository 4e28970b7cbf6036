//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Each iteration runs a full-window `alpha_beta` from the root, then rebuilds
//! the principal variation by replaying transposition-table moves from the
//! root position. The search works in place on the caller's `GameState`
//! through `make_move` / `take_move` and leaves it as it found it.

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::game_state::chess_rules::{FIFTY_MOVE_LIMIT, MAX_POSITION_MOVES, MAX_SEARCH_DEPTH};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::{bring_best_move_to_top, MoveOrdering};
use crate::search::search_info::SearchInfo;
use crate::search::transposition_table::TranspositionTable;

/// Score of being checkmated at the root; mates further away score closer to 0.
pub const MATE: i32 = 29_000;
/// Bound of the root search window.
pub const INFINITY: i32 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub tt_size_bytes: usize,
    /// TT move, MVV-LVA, killers and history. Off searches in generation order.
    pub move_ordering: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            tt_size_bytes: 16 * 1024 * 1024,
            move_ordering: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationReport {
    pub depth: u8,
    pub score: i32,
    pub best_move: Option<Move>,
    pub pv: Vec<Move>,
    /// Cumulative node count when the iteration finished.
    pub nodes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub pv: Vec<Move>,
    pub iterations: Vec<IterationReport>,
    pub info: SearchInfo,
    pub elapsed_ms: u128,
}

pub struct SearchEngine<'a, G: MoveGenerator, S: BoardScorer> {
    generator: &'a G,
    scorer: &'a S,
    config: SearchConfig,
    tt: TranspositionTable,
    ordering: MoveOrdering,
    info: SearchInfo,
    pv: [Option<Move>; MAX_SEARCH_DEPTH],
    root_best: Option<Move>,
}

impl<'a, G: MoveGenerator, S: BoardScorer> SearchEngine<'a, G, S> {
    pub fn new(generator: &'a G, scorer: &'a S, config: SearchConfig) -> Self {
        Self {
            generator,
            scorer,
            config,
            tt: TranspositionTable::new_with_bytes(config.tt_size_bytes),
            ordering: MoveOrdering::default(),
            info: SearchInfo {
                depth: config.max_depth,
                ..SearchInfo::default()
            },
            pv: [None; MAX_SEARCH_DEPTH],
            root_best: None,
        }
    }

    #[inline]
    pub fn info(&self) -> &SearchInfo {
        &self.info
    }

    #[inline]
    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// The principal variation collected by the last `populate_pv_line`.
    pub fn pv(&self) -> Vec<Move> {
        self.pv.iter().map_while(|slot| *slot).collect()
    }

    fn reset(&mut self, game_state: &mut GameState) {
        self.ordering.clear();
        self.pv = [None; MAX_SEARCH_DEPTH];
        self.root_best = None;
        self.tt.clear();
        self.info = SearchInfo {
            depth: self.config.max_depth,
            ..SearchInfo::default()
        };
        game_state.set_ply(0);
    }

    /// Run iterations 1..=max_depth from `game_state`. Ply is counted from 0
    /// while searching and the caller's ply is put back afterwards.
    pub fn search(&mut self, game_state: &mut GameState) -> SearchResult {
        let started = Instant::now();
        let caller_ply = game_state.ply();
        self.reset(game_state);

        let max_depth = self.config.max_depth.min(MAX_SEARCH_DEPTH as u8);
        debug!(
            max_depth,
            tt_entries = self.tt.len(),
            move_ordering = self.config.move_ordering,
            hash = game_state.hash(),
            "starting search"
        );

        let mut result = SearchResult {
            best_score: self.scorer.score(game_state),
            ..SearchResult::default()
        };

        for depth in 1..=max_depth {
            let score = self.alpha_beta(game_state, -INFINITY, INFINITY, depth);
            self.populate_pv_line(game_state, depth);
            let pv = self.pv();

            info!(
                depth,
                score,
                nodes = self.info.nodes,
                best_move = %format_move(self.root_best),
                pv = %format_line(&pv),
                "iteration complete"
            );

            result.iterations.push(IterationReport {
                depth,
                score,
                best_move: self.root_best,
                pv: pv.clone(),
                nodes: self.info.nodes,
            });
            result.best_move = self.root_best;
            result.best_score = score;
            result.reached_depth = depth;
            result.pv = pv;
        }

        // A root drawn by repetition or the fifty-move rule scores 0 without
        // searching, but a playable position still gets a move.
        if result.best_move.is_none() && result.reached_depth > 0 {
            result.best_move = self.first_legal_move(game_state);
            if let Some(mv) = result.best_move {
                debug!(%mv, "root is drawn by rule, falling back to first legal move");
            }
        }

        game_state.set_ply(caller_ply);
        result.info = self.info;
        result.elapsed_ms = started.elapsed().as_millis();
        result
    }

    fn first_legal_move(&self, game_state: &mut GameState) -> Option<Move> {
        let mut moves = Vec::with_capacity(MAX_POSITION_MOVES);
        self.generator.generate_moves(game_state, None, &mut moves);
        moves.into_iter().find(|&mv| {
            let legal = game_state.make_move(mv);
            if legal {
                game_state.take_move();
            }
            legal
        })
    }

    /// Negamax alpha-beta, fail-hard. Scores are from the side to move.
    pub fn alpha_beta(&mut self, game_state: &mut GameState, mut alpha: i32, beta: i32, depth: u8) -> i32 {
        if depth == 0 {
            return self.scorer.score(game_state);
        }
        if game_state.is_repetition() {
            self.info.repetitions += 1;
            return 0;
        }
        if game_state.fifty_move_counter() >= FIFTY_MOVE_LIMIT {
            self.info.fifty_move_draws += 1;
            return 0;
        }
        let ply = game_state.ply() as usize;
        if ply > MAX_SEARCH_DEPTH - 1 {
            self.info.max_depth_reached += 1;
            return self.scorer.score(game_state);
        }

        let mut moves = Vec::with_capacity(MAX_POSITION_MOVES);
        self.generator.generate_moves(game_state, None, &mut moves);
        let mut scores = if self.config.move_ordering {
            let tt_move = self.tt.probe(game_state.hash());
            self.ordering.score_moves(game_state, &moves, ply, tt_move)
        } else {
            Vec::new()
        };

        let alpha_on_entry = alpha;
        let mut best_move = None;
        let mut legal_moves = 0u32;

        for index in 0..moves.len() {
            if self.config.move_ordering {
                bring_best_move_to_top(&mut moves, &mut scores, index);
            }
            let mv = moves[index];

            self.info.nodes += 1;
            if !game_state.make_move(mv) {
                self.info.invalid_moves += 1;
                continue;
            }
            legal_moves += 1;

            let score = -self.alpha_beta(game_state, -beta, -alpha, depth - 1);
            game_state.take_move();

            if score >= beta {
                if self.config.move_ordering {
                    self.ordering.record_cutoff(game_state, mv, ply, depth);
                }
                return beta;
            }
            if score > alpha {
                alpha = score;
                best_move = Some(mv);
            }
        }

        if legal_moves == 0 {
            return if is_king_in_check(game_state, game_state.side_to_move()) {
                -MATE + ply as i32
            } else {
                0
            };
        }

        if alpha != alpha_on_entry {
            if let Some(mv) = best_move {
                self.tt.insert_or_refresh(game_state.hash(), mv);
                self.info.tt_inserts += 1;
                if ply == 0 {
                    self.root_best = Some(mv);
                }
            }
        }

        alpha
    }

    /// Follow table moves from the current position for at most `depth`
    /// plies, then take them all back. Returns the line length.
    pub fn populate_pv_line(&mut self, game_state: &mut GameState, depth: u8) -> usize {
        let limit = (depth as usize).min(MAX_SEARCH_DEPTH);
        let mut count = 0;

        while count < limit {
            let Some(mv) = self.tt.probe(game_state.hash()) else {
                break;
            };
            if !self.is_generated(game_state, mv) || !game_state.make_move(mv) {
                trace!(%mv, ply = count, "table move not playable, truncating PV");
                break;
            }
            self.pv[count] = Some(mv);
            count += 1;
        }

        for _ in 0..count {
            game_state.take_move();
        }
        for slot in &mut self.pv[count..] {
            *slot = None;
        }
        count
    }

    fn is_generated(&self, game_state: &GameState, mv: Move) -> bool {
        let mut moves = Vec::with_capacity(MAX_POSITION_MOVES);
        self.generator.generate_moves(game_state, None, &mut moves);
        moves.contains(&mv)
    }
}

pub fn iterative_deepening_search<G: MoveGenerator, S: BoardScorer>(
    game_state: &mut GameState,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    SearchEngine::new(generator, scorer, config).search(game_state)
}

fn format_move(mv: Option<Move>) -> String {
    mv.map_or_else(|| "-".to_owned(), |mv| mv.to_string())
}

pub fn format_line(line: &[Move]) -> String {
    line.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
}
