//! `isolation_core::ai::random` の性能計測（1手選択）。

use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::black_box;
use isolation_core::ai::types::Ai;
use isolation_core::{ai, engine};

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// 時間切れを起こさない持ち時間。
fn plenty() -> f64 {
    f64::INFINITY
}

/// 指定手数だけ進めた局面を返す（途中で終局した場合はその時点で止める）。
fn position_after_plies(plies: u16) -> engine::Board {
    let mut first_agent = ai::random::Agent::new(u64::MIN);
    let mut game = engine::Game::default();
    let mut second_agent = ai::random::Agent::new(u64::MIN.wrapping_add(1));

    for _turn in u16::MIN..plies {
        let board = game.board().clone();

        let mv = match game.side_to_move() {
            engine::Player::First => first_agent.choose_move(&board, &plenty),
            engine::Player::Second => second_agent.choose_move(&board, &plenty),
            _ => ai::Move::NoMove,
        };

        match game.play(mv) {
            Ok(engine::GameStatus::InProgress) => {}
            _ => break,
        }
    }

    game.board().clone()
}

/// ベンチ用に代表局面をいくつか用意する。
fn position_samples() -> [engine::Board; 3] {
    let p0 = engine::Board::default();
    let p1 = position_after_plies(8);
    let p2 = position_after_plies(24);
    [p0, p1, p2]
}

/// `random::Agent::choose_move` を計測する。
fn bench_choose_move(criterion: &mut Criterion) {
    let samples = position_samples();
    let mut group = criterion.benchmark_group("ai/random/choose_move");

    for (index, board) in samples.iter().enumerate() {
        let bench_id = BenchmarkId::new("pos", index);
        group.bench_with_input(bench_id, board, |bench, input| {
            bench.iter_batched(
                || ai::random::Agent::new(u64::MIN),
                |mut agent| black_box(agent.choose_move(input, &plenty)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();
    bench_choose_move(&mut criterion);
    criterion.final_summary();
}
