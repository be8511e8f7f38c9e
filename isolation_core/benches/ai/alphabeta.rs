//! `isolation_core::ai::search` の性能計測（固定深さのミニマックスとアルファベータ）。

use core::hint::black_box;
use criterion::BenchmarkId;
use criterion::Criterion;
use isolation_core::ai::eval;
use isolation_core::ai::search::{self, SearchContext, TimeBudget};
use isolation_core::ai::types::Ai;
use isolation_core::engine::{self, state::GameState as _};
use isolation_core::{ai, engine::Board};

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// 時間切れを起こさない持ち時間。
fn plenty() -> f64 {
    f64::INFINITY
}

/// 指定手数だけ乱択で進めた局面を返す（途中で終局した場合はその時点で止める）。
fn position_after_plies(plies: u16) -> Board {
    let mut agent = ai::random::Agent::new(u64::MIN);
    let mut game = engine::Game::default();

    for _turn in u16::MIN..plies {
        let board = game.board().clone();
        let mv = agent.choose_move(&board, &plenty);
        match game.play(mv) {
            Ok(engine::GameStatus::InProgress) => {}
            _ => break,
        }
    }

    game.board().clone()
}

/// 1回の深さ制限探索を行う。
fn run(strategy: search::DepthSearch<Board>, board: &Board, depth: u32) -> ai::Move {
    let budget = TimeBudget::new(&plenty, search::DEFAULT_TIMER_THRESHOLD_MS);
    let mut ctx = SearchContext::new(board.active_player(), eval::improved_score, budget);
    strategy(board, depth, &mut ctx).map_or(ai::Move::NoMove, search::SearchResult::best_move)
}

/// 深さごとにミニマックスとアルファベータを比較する。
fn bench_depth_search(criterion: &mut Criterion) {
    let board = position_after_plies(6);
    let mut group = criterion.benchmark_group("ai/search/depth");

    for depth in 1_u32..=4 {
        group.bench_with_input(BenchmarkId::new("minimax", depth), &depth, |bench, &d| {
            bench.iter(|| black_box(run(search::minimax::minimax, &board, d)));
        });
        group.bench_with_input(BenchmarkId::new("alphabeta", depth), &depth, |bench, &d| {
            bench.iter(|| black_box(run(search::alphabeta::alphabeta, &board, d)));
        });
    }

    group.finish();
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();
    bench_depth_search(&mut criterion);
    criterion.final_summary();
}
