use crate::engine::types::{Cell, Player};

/// AIが選択する手。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Move {
    /// 合法手が無い、または時間内に手が見つからなかった。
    NoMove,
    /// 指定マスへ移動。
    Place(Cell),
}

impl Move {
    /// 移動先のマスを返す（`NoMove` なら `None`）。
    #[inline]
    #[must_use]
    pub const fn cell(self) -> Option<Cell> {
        match self {
            Self::NoMove => None,
            Self::Place(cell) => Some(cell),
        }
    }
}

/// 評価関数（`player` 視点のスコアを返す純粋関数）。
pub type Evaluator<S> = fn(&S, Player) -> f64;

/// 手番の残り時間（ミリ秒）を返すコールバック。
pub type TimeLeft<'a> = &'a dyn Fn() -> f64;

/// 手を選択するAI。
pub trait Ai<S> {
    /// 現在局面から次の手を選択する。
    ///
    /// `time_left` は毎手番で呼び出し側から渡される。
    /// 時間内に手が見つからない場合や合法手が無い場合は `Move::NoMove` を返す。
    fn choose_move(&mut self, state: &S, time_left: TimeLeft<'_>) -> Move;
}
