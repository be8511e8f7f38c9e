//! AI同士で1局指し、各手を JSON ログとして出力する対局ランナー。

use isolation_core::ai::types::Ai as _;
use isolation_core::engine::state::GameState as _;
use isolation_core::{ai, engine};
use std::time::Instant;
use tracing::{info, warn};

/// 盤面の一辺の長さ（マス）。
const BOARD_LEN: u8 = 7;

/// 1手あたりの持ち時間（ミリ秒）。
const TIME_LIMIT_MS: f64 = 150.0;

/// 固定深さAIの探索深さ。
const MINIMAX_DEPTH: u32 = 3;

#[derive(Debug)]
enum Controller {
    Alphabeta(ai::alphabeta::Agent<engine::Board>),
    Minimax(ai::minimax::Agent<engine::Board>),
}

impl Controller {
    fn choose_move(&mut self, board: &engine::Board, time_left: &dyn Fn() -> f64) -> ai::Move {
        match self {
            Self::Alphabeta(agent) => agent.choose_move(board, time_left),
            Self::Minimax(agent) => agent.choose_move(board, time_left),
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Alphabeta(_) => "alphabeta",
            Self::Minimax(_) => "minimax",
        }
    }
}

#[derive(Debug)]
struct App {
    first: Controller,
    game: engine::Game,
    second: Controller,
}

impl App {
    fn new() -> Self {
        Self {
            first: Controller::Alphabeta(ai::alphabeta::Agent::new(
                ai::eval::ply_weighted_score,
                ai::search::DEFAULT_TIMER_THRESHOLD_MS,
            )),
            game: engine::Game::new(BOARD_LEN, BOARD_LEN),
            second: Controller::Minimax(ai::minimax::Agent::new(
                MINIMAX_DEPTH,
                ai::eval::improved_score,
                ai::search::DEFAULT_TIMER_THRESHOLD_MS,
            )),
        }
    }

    fn controller_for_mut(&mut self, player: engine::Player) -> &mut Controller {
        match player {
            engine::Player::First => &mut self.first,
            engine::Player::Second => &mut self.second,
            _ => &mut self.first,
        }
    }

    /// 手番側のAIに1手選ばせて適用する。終局したら勝者を返す。
    fn step_once(&mut self) -> Option<engine::Player> {
        let side = self.game.side_to_move();
        let board = self.game.board().clone();

        let started = Instant::now();
        let time_left = || TIME_LIMIT_MS - started.elapsed().as_secs_f64() * 1_000.0;
        let controller = self.controller_for_mut(side);
        let name = controller.name();
        let mv = controller.choose_move(&board, &time_left);
        let remaining_ms = time_left();

        if remaining_ms < 0.0 {
            warn!(?side, agent = name, remaining_ms, "agent exceeded its turn budget");
        }
        info!(
            ply = board.move_count(),
            ?side,
            agent = name,
            mv = %mv.cell().map_or_else(|| "none".to_owned(), |cell| cell.to_string()),
            remaining_ms,
            "move chosen"
        );

        match self.game.play(mv) {
            Ok(engine::GameStatus::Finished { winner }) => Some(winner),
            Ok(_) => None,
            Err(err) => {
                warn!(?side, ?err, "move rejected, forfeiting");
                Some(side.opponent())
            }
        }
    }
}

/// 盤面を1行ずつの文字列にする（`.` 空き、`#` 塞がり、`1`/`2` 駒）。
fn render(board: &engine::Board) -> Vec<String> {
    let first = board.player_location(engine::Player::First);
    let second = board.player_location(engine::Player::Second);

    (0..board.height())
        .map(|row| {
            (0..board.width())
                .map(|col| {
                    let cell = engine::Cell::new(row, col);
                    if first == Some(cell) {
                        '1'
                    } else if second == Some(cell) {
                        '2'
                    } else if board.is_empty(cell) {
                        '.'
                    } else {
                        '#'
                    }
                })
                .collect()
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt().json().init();

    let mut app = App::new();
    info!(
        first = app.first.name(),
        second = app.second.name(),
        board_len = BOARD_LEN,
        time_limit_ms = TIME_LIMIT_MS,
        "match started"
    );

    let winner = loop {
        if let Some(winner) = app.step_once() {
            break winner;
        }
    };

    info!(
        ?winner,
        plies = app.game.board().move_count(),
        board = ?render(app.game.board()),
        "match finished"
    );
}
