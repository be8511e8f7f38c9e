use tracing::{debug, trace};

use crate::ai::eval::mobility_centrality_score;
use crate::ai::search::minimax::minimax;
use crate::ai::search::{DEFAULT_TIMER_THRESHOLD_MS, SearchContext, TimeBudget};
use crate::ai::types::{Ai, Evaluator, Move, TimeLeft};
use crate::engine::state::GameState;

/// 探索深さの既定値。
pub const DEFAULT_SEARCH_DEPTH: u32 = 3_u32;

/// 固定深さのミニマックス探索を行うAI。
#[derive(Debug)]
#[non_exhaustive]
pub struct Agent<S> {
    /// 探索深さ。
    depth: u32,
    /// 葉で使う評価関数。
    evaluator: Evaluator<S>,
    /// 残り時間がこれ以下（ミリ秒）になったら探索を打ち切る。
    timer_threshold_ms: f64,
}

impl<S> Agent<S> {
    /// 設定された探索深さを返す（0 を指定した場合も 0 を返すが、探索は深さ 1 で行う）。
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// 探索深さ・評価関数・打ち切り閾値を指定して初期化する。
    ///
    /// 深さ 0 の探索はルートを展開せず常に `Move::NoMove` になるため、
    /// `choose_move` では深さ 0 を深さ 1 として扱う。
    #[inline]
    #[must_use]
    pub const fn new(depth: u32, evaluator: Evaluator<S>, timer_threshold_ms: f64) -> Self {
        Self {
            depth,
            evaluator,
            timer_threshold_ms,
        }
    }
}

impl<S: GameState> Default for Agent<S> {
    #[inline]
    fn default() -> Self {
        Self::new(
            DEFAULT_SEARCH_DEPTH,
            mobility_centrality_score,
            DEFAULT_TIMER_THRESHOLD_MS,
        )
    }
}

impl<S: GameState> Ai<S> for Agent<S> {
    /// 固定深さで1回だけ探索する。時間切れなら浅い結果は無いので `Move::NoMove` を返す。
    #[inline]
    fn choose_move(&mut self, state: &S, time_left: TimeLeft<'_>) -> Move {
        let depth = normalize_depth(self.depth);
        let budget = TimeBudget::new(time_left, self.timer_threshold_ms);
        let mut ctx = SearchContext::new(state.active_player(), self.evaluator, budget);

        match minimax(state, depth, &mut ctx) {
            Ok(result) => {
                trace!(
                    depth,
                    score = result.score(),
                    nodes = ctx.stats().nodes(),
                    "minimax move chosen"
                );
                result.best_move()
            }
            Err(_timeout) => {
                debug!(depth, nodes = ctx.stats().nodes(), "minimax timed out");
                Move::NoMove
            }
        }
    }
}

/// 探索深さを正規化する（0の場合は1にする）。
#[inline]
const fn normalize_depth(depth: u32) -> u32 {
    if depth == u32::MIN {
        u32::MIN.wrapping_add(1_u32)
    } else {
        depth
    }
}
