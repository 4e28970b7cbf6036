use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kestrel::game_state::chess_rules::STARTING_POSITION_FEN;
use kestrel::game_state::game_state::GameState;
use kestrel::move_generation::move_generator::PseudoLegalMoveGenerator;
use kestrel::search::board_scoring::PawnStructureScorer;
use kestrel::search::iterative_deepening::{iterative_deepening_search, SearchConfig, MATE};

#[derive(Clone, Copy)]
struct SearchCase {
    name: &'static str,
    fen: &'static str,
    depth: u8,
    /// Guard checked once before measuring.
    expected_score: Option<i32>,
}

const CASES_QUICK: &[SearchCase] = &[
    SearchCase {
        name: "startpos",
        fen: STARTING_POSITION_FEN,
        depth: 4,
        expected_score: None,
    },
    SearchCase {
        name: "mate_in_one",
        fen: "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
        depth: 2,
        expected_score: Some(MATE - 1),
    },
];

const CASES_STANDARD: &[SearchCase] = &[
    SearchCase {
        name: "startpos",
        fen: STARTING_POSITION_FEN,
        depth: 5,
        expected_score: None,
    },
    SearchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depth: 4,
        expected_score: None,
    },
    SearchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depth: 6,
        expected_score: None,
    },
];

fn selected_suite() -> (&'static str, &'static [SearchCase]) {
    match std::env::var("KESTREL_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => ("standard", CASES_STANDARD),
        _ => ("quick", CASES_QUICK),
    }
}

fn bench_search(c: &mut Criterion) {
    let (suite_name, cases) = selected_suite();

    let mut group = c.benchmark_group(format!("search_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    let generator = PseudoLegalMoveGenerator;
    let scorer = PawnStructureScorer::default();

    for case in cases {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let config = SearchConfig {
            max_depth: case.depth,
            ..SearchConfig::default()
        };

        let mut warmup_game = game.clone();
        let warmup = iterative_deepening_search(&mut warmup_game, &generator, &scorer, config);
        assert!(warmup.best_move.is_some(), "{} should have a best move", case.name);
        if let Some(expected) = case.expected_score {
            assert_eq!(warmup.best_score, expected, "score mismatch for {}", case.name);
        }

        let mut bench_game = game.clone();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_d{}", case.name, case.depth)),
            &config,
            |b, config| {
                b.iter(|| {
                    let result = iterative_deepening_search(black_box(&mut bench_game), &generator, &scorer, *config);
                    black_box(result.info.nodes)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
