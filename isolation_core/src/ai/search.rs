//! 探索コア。
//!
//! スコアは常にルート（探索開始時の手番）視点で計算する。
//! 各ノードで最大化するか最小化するかはそのノードの手番から決め、`Role` として明示的に渡す。
//! 手番の飛び（同じプレイヤーが続けて指す局面）があっても深さの偶奇には依存しない。

/// アルファベータ探索。
pub mod alphabeta;
/// 時間制限付きの反復深化。
pub mod deepening;
/// 時間予算と探索統計。
pub mod limits;
/// ミニマックス探索。
pub mod minimax;

#[cfg(test)]
mod tests;

use crate::ai::types::Move;
use crate::engine::state::GameState;
use crate::engine::types::Player;

pub type Deepening = deepening::Deepening;
pub type DepthSearch<S> = deepening::DepthSearch<S>;
pub type SearchContext<'ctx, S> = limits::SearchContext<'ctx, S>;
pub type SearchStats = limits::SearchStats;
pub type SearchTimeout = limits::SearchTimeout;
pub type TimeBudget<'ctx> = limits::TimeBudget<'ctx>;

/// 探索を打ち切る残り時間の既定値（ミリ秒）。
pub const DEFAULT_TIMER_THRESHOLD_MS: f64 = 10.0_f64;

/// 探索結果。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    /// このノードで選択した最善手（葉では `Move::NoMove`）。
    best_move: Move,
    /// `best_move` の評価値（ルート視点）。
    score: f64,
}

impl SearchResult {
    /// このノードで選択した最善手を返す。
    #[inline]
    #[must_use]
    pub const fn best_move(self) -> Move {
        self.best_move
    }

    /// 展開しなかったノードの結果を生成する。
    pub(super) const fn leaf(score: f64) -> Self {
        Self {
            best_move: Move::NoMove,
            score,
        }
    }

    /// 結果を生成する。
    pub(super) const fn new(best_move: Move, score: f64) -> Self {
        Self { best_move, score }
    }

    /// 評価値（ルート視点）を返す。
    #[inline]
    #[must_use]
    pub const fn score(self) -> f64 {
        self.score
    }
}

/// ノードでの役割。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Role {
    /// ルートのプレイヤーが手番（最大化）。
    Max,
    /// 相手が手番（最小化）。
    Min,
}

impl Role {
    /// 局面の手番とルートのプレイヤーから役割を決める。
    fn at<S: GameState>(state: &S, root: Player) -> Self {
        if state.active_player() == root {
            Self::Max
        } else {
            Self::Min
        }
    }

    /// `candidate` が `incumbent` より厳密に良いか（同点は先に見つけた手を残す）。
    fn prefers(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Max => candidate > incumbent,
            Self::Min => candidate < incumbent,
        }
    }
}
