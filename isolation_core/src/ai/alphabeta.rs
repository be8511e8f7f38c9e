use tracing::trace;

use crate::ai::eval::mobility_centrality_score;
use crate::ai::search::alphabeta::alphabeta;
use crate::ai::search::deepening::iterative_deepening;
use crate::ai::search::{DEFAULT_TIMER_THRESHOLD_MS, SearchContext, TimeBudget};
use crate::ai::types::{Ai, Evaluator, Move, TimeLeft};
use crate::engine::state::GameState;

/// 反復深化アルファベータ探索を行うAI。
///
/// 時間切れになった深さの結果は捨て、直前に完了した深さの手を返す。
#[derive(Debug)]
#[non_exhaustive]
pub struct Agent<S> {
    /// 葉で使う評価関数。
    evaluator: Evaluator<S>,
    /// 反復深化の最大深さ（`None` なら時間が尽きるか読み切るまで）。
    max_depth: Option<u32>,
    /// 残り時間がこれ以下（ミリ秒）になったら探索を打ち切る。
    timer_threshold_ms: f64,
}

impl<S> Agent<S> {
    /// 反復深化の最大深さを返す。
    #[inline]
    #[must_use]
    pub const fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }

    /// 評価関数と打ち切り閾値を指定して初期化する。
    #[inline]
    #[must_use]
    pub const fn new(evaluator: Evaluator<S>, timer_threshold_ms: f64) -> Self {
        Self {
            evaluator,
            max_depth: None,
            timer_threshold_ms,
        }
    }

    /// 反復深化の最大深さを設定する。
    #[inline]
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

impl<S: GameState> Default for Agent<S> {
    #[inline]
    fn default() -> Self {
        Self::new(mobility_centrality_score, DEFAULT_TIMER_THRESHOLD_MS)
    }
}

impl<S: GameState> Ai<S> for Agent<S> {
    #[inline]
    fn choose_move(&mut self, state: &S, time_left: TimeLeft<'_>) -> Move {
        let budget = TimeBudget::new(time_left, self.timer_threshold_ms);
        let mut ctx = SearchContext::new(state.active_player(), self.evaluator, budget);

        let result = iterative_deepening(state, alphabeta, &mut ctx, self.max_depth);
        trace!(
            completed_depth = result.completed_depth(),
            nodes = ctx.stats().nodes(),
            cutoffs = ctx.stats().cutoffs(),
            "alphabeta move chosen"
        );
        result.best_move()
    }
}
