use core::fmt;

use crate::ai::types::{Evaluator, TimeLeft};
use crate::engine::types::Player;

use super::SearchResult;

/// 残り時間が閾値以下になったため探索を中断した。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SearchTimeout;

impl fmt::Display for SearchTimeout {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("search time budget exhausted")
    }
}

/// 手番の持ち時間（呼び出し側が所有する時計の読み取り専用ビュー）。
#[derive(Clone, Copy)]
pub struct TimeBudget<'ctx> {
    /// これ以下の残り時間（ミリ秒）になったら探索を打ち切る。
    threshold_ms: f64,
    /// 残り時間（ミリ秒）を返すコールバック。
    time_left: TimeLeft<'ctx>,
}

impl<'ctx> TimeBudget<'ctx> {
    /// 残り時間を確認する。閾値以下なら `SearchTimeout` を返す。
    ///
    /// # Errors
    ///
    /// 残り時間が `threshold_ms` 以下の場合に `SearchTimeout` を返す。
    #[inline]
    pub fn check(&self) -> Result<(), SearchTimeout> {
        if self.remaining_ms() <= self.threshold_ms {
            return Err(SearchTimeout);
        }
        Ok(())
    }

    /// 持ち時間を生成する。
    #[inline]
    #[must_use]
    pub const fn new(time_left: TimeLeft<'ctx>, threshold_ms: f64) -> Self {
        Self {
            threshold_ms,
            time_left,
        }
    }

    /// 残り時間（ミリ秒）を返す。
    #[inline]
    #[must_use]
    pub fn remaining_ms(&self) -> f64 {
        (self.time_left)()
    }

    /// 打ち切りの閾値（ミリ秒）を返す。
    #[inline]
    #[must_use]
    pub const fn threshold_ms(&self) -> f64 {
        self.threshold_ms
    }
}

impl fmt::Debug for TimeBudget<'_> {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TimeBudget")
            .field("threshold_ms", &self.threshold_ms)
            .finish_non_exhaustive()
    }
}

/// 探索統計。
#[derive(Default, Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchStats {
    /// アルファ/ベータカットの回数。
    cutoffs: u64,
    /// 深さ切れで評価した葉の数。
    horizon_leaves: u64,
    /// 探索したノード数。
    nodes: u64,
    /// 合法手が無く評価した葉の数。
    terminal_leaves: u64,
}

impl SearchStats {
    /// カット回数を返す。
    #[inline]
    #[must_use]
    pub const fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    /// 深さ切れの葉の数を返す。
    #[inline]
    #[must_use]
    pub const fn horizon_leaves(&self) -> u64 {
        self.horizon_leaves
    }

    /// カット回数を加算する。
    pub(super) const fn inc_cutoffs(&mut self) {
        self.cutoffs = self.cutoffs.wrapping_add(1_u64);
    }

    /// 深さ切れの葉の数を加算する。
    const fn inc_horizon_leaves(&mut self) {
        self.horizon_leaves = self.horizon_leaves.wrapping_add(1_u64);
    }

    /// 探索ノード数を加算する。
    pub(super) const fn inc_nodes(&mut self) {
        self.nodes = self.nodes.wrapping_add(1_u64);
    }

    /// 合法手なしの葉の数を加算する。
    const fn inc_terminal_leaves(&mut self) {
        self.terminal_leaves = self.terminal_leaves.wrapping_add(1_u64);
    }

    /// 評価した葉の総数を返す。
    #[inline]
    #[must_use]
    pub const fn leaves(&self) -> u64 {
        self.horizon_leaves.wrapping_add(self.terminal_leaves)
    }

    /// 探索ノード数を返す。
    #[inline]
    #[must_use]
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// 合法手なしの葉の数を返す。
    #[inline]
    #[must_use]
    pub const fn terminal_leaves(&self) -> u64 {
        self.terminal_leaves
    }
}

/// 探索実行に必要なコンテキスト。
///
/// 再帰呼び出しのすべてにそのまま渡す。手番ごとに作り直すので、前の手番の時計を誤って使うことはない。
pub struct SearchContext<'ctx, S> {
    /// 持ち時間。
    budget: TimeBudget<'ctx>,
    /// 葉で使う評価関数。
    evaluator: Evaluator<S>,
    /// スコアの視点となるプレイヤー。
    root: Player,
    /// 探索統計。
    stats: SearchStats,
}

impl<'ctx, S> SearchContext<'ctx, S> {
    /// 持ち時間を返す。
    #[inline]
    #[must_use]
    pub const fn budget(&self) -> &TimeBudget<'ctx> {
        &self.budget
    }

    /// ルート視点で局面を評価する。
    fn evaluate(&self, state: &S) -> f64 {
        (self.evaluator)(state, self.root)
    }

    /// 深さ切れの葉として局面を評価する。
    pub(super) fn horizon_leaf(&mut self, state: &S) -> SearchResult {
        self.stats.inc_horizon_leaves();
        SearchResult::leaf(self.evaluate(state))
    }

    /// 探索コンテキストを生成する。
    #[inline]
    #[must_use]
    pub const fn new(root: Player, evaluator: Evaluator<S>, budget: TimeBudget<'ctx>) -> Self {
        Self {
            budget,
            evaluator,
            root,
            stats: SearchStats {
                cutoffs: 0_u64,
                horizon_leaves: 0_u64,
                nodes: 0_u64,
                terminal_leaves: 0_u64,
            },
        }
    }

    /// スコアの視点となるプレイヤーを返す。
    #[inline]
    #[must_use]
    pub const fn root(&self) -> Player {
        self.root
    }

    /// 探索統計を返す。
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// 探索統計への可変参照を返す。
    pub(super) const fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    /// 合法手が無い葉として局面を評価する。
    pub(super) fn terminal_leaf(&mut self, state: &S) -> SearchResult {
        self.stats.inc_terminal_leaves();
        SearchResult::leaf(self.evaluate(state))
    }
}

impl<S> fmt::Debug for SearchContext<'_, S> {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SearchContext")
            .field("budget", &self.budget)
            .field("root", &self.root)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
