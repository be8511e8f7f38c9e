use tracing::debug;

use crate::ai::types::Move;
use crate::engine::state::GameState;

use super::SearchResult;
use super::limits::{SearchContext, SearchTimeout};

/// 反復深化で1段ずつ呼び出す深さ制限探索（`minimax` または `alphabeta`）。
pub type DepthSearch<S> =
    fn(&S, u32, &mut SearchContext<'_, S>) -> Result<SearchResult, SearchTimeout>;

/// 反復深化の結果。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deepening {
    /// 最後に完了した深さで選ばれた手（1段も完了しなければ `Move::NoMove`）。
    best_move: Move,
    /// 完了した最大の深さ（0 なら1段も完了していない）。
    completed_depth: u32,
    /// `best_move` の評価値（1段も完了しなければ `None`）。
    score: Option<f64>,
}

impl Deepening {
    /// 採用した手を返す。
    #[inline]
    #[must_use]
    pub const fn best_move(self) -> Move {
        self.best_move
    }

    /// 完了した最大の深さを返す。
    #[inline]
    #[must_use]
    pub const fn completed_depth(self) -> u32 {
        self.completed_depth
    }

    /// 採用した手の評価値を返す。
    #[inline]
    #[must_use]
    pub const fn score(self) -> Option<f64> {
        self.score
    }
}

/// 反復深化によるルート探索。
///
/// 深さ 1 から 1 ずつ深くし、毎回新しく `search` を呼ぶ。引き継ぐのは直近に完了した手だけ。
/// 次の場合に打ち切る：
/// - `SearchTimeout`（途中の深さの結果は捨て、直前に完了した手を返す）
/// - `max_depth` に達した
/// - 完了した深さで深さ切れの葉が1つも無かった（探索木を読み切った）
#[inline]
pub fn iterative_deepening<S: GameState>(
    state: &S,
    search: DepthSearch<S>,
    ctx: &mut SearchContext<'_, S>,
    max_depth: Option<u32>,
) -> Deepening {
    let mut best_move = Move::NoMove;
    let mut completed_depth = 0_u32;
    let mut score = None;
    let mut depth = 1_u32;

    loop {
        if max_depth.is_some_and(|limit| depth > limit) {
            break;
        }

        let horizon_before = ctx.stats().horizon_leaves();
        match search(state, depth, ctx) {
            Ok(result) => {
                best_move = result.best_move();
                completed_depth = depth;
                score = Some(result.score());
                debug!(
                    depth,
                    score = result.score(),
                    nodes = ctx.stats().nodes(),
                    "depth completed"
                );
            }
            Err(SearchTimeout) => {
                debug!(depth, completed_depth, "search timed out");
                break;
            }
        }

        if ctx.stats().horizon_leaves() == horizon_before {
            debug!(depth, "search tree exhausted");
            break;
        }

        depth = match depth.checked_add(1_u32) {
            Some(value) => value,
            None => break,
        };
    }

    Deepening {
        best_move,
        completed_depth,
        score,
    }
}
